use cinerow_config::ConfigGuardRailError;
use cinerow_model::{ElementId, RowId};
use thiserror::Error;

use crate::slider::TransitionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("items per row must be at least 1")]
    InvalidItemsPerRow,

    #[error("cursor {cursor} is out of range for a row of {total} items")]
    CursorOutOfRange { cursor: usize, total: usize },

    #[error("unknown row: {0}")]
    UnknownRow(RowId),

    #[error("row already registered: {0}")]
    DuplicateRow(RowId),

    #[error("title card not mounted: {0}")]
    CardNotMounted(ElementId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigGuardRailError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Faults a row recovers from on its own but that callers should surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliderFault {
    #[error(
        "transition {transition} on {row} never reported completion; force-committed after {waited_ms}ms"
    )]
    StalledTransition {
        row: RowId,
        transition: TransitionId,
        waited_ms: u64,
    },
}
