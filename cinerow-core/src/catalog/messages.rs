//! Input messages and output effects of the catalog view

use cinerow_model::{ElementId, Rect, RowId, VideoId};
use serde::{Deserialize, Serialize};

use crate::preview::{ListenerId, PreviewEvent};
use crate::slider::{Direction, Pagination, Transition, TransitionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogMessage {
    // Navigation
    Navigate { row: RowId, direction: Direction },
    /// Arrow key: pages the hovered or keyboard-active row.
    NavigateActive { direction: Direction },
    /// Completion signal from the animation layer.
    TransitionEnded { row: RowId, transition: TransitionId },

    // Title cards
    PointerEnter { element: ElementId },
    PointerLeave { element: ElementId },
    Click { element: ElementId },
    KeyEnter { element: ElementId },
    CardMeasured { element: ElementId, rect: Rect },

    // Rows
    RowHovered { row: Option<RowId> },

    // Modals
    CloseModal {
        #[serde(default)]
        video: Option<VideoId>,
        #[serde(default)]
        without_animation: bool,
    },
    ResizeObserved { listener: ListenerId, rect: Rect },

    // Viewport
    ViewportResized { width: f32 },
    Scrolled { position: f32 },

    /// Fire whatever timers are due.
    Tick,
}

/// Instructions for the rendering layer, in the order they must be applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEffect {
    /// Animate the row from `transition.from_offset` to `to_offset` and
    /// report [`CatalogMessage::TransitionEnded`] when done.
    StartTransition {
        row: RowId,
        transition: Transition,
        duration_ms: u64,
    },
    /// Re-render the row's slice and jump to the settled offset without
    /// animation.
    SnapOffset {
        row: RowId,
        lowest_index: usize,
        offset_percent: f32,
    },
    /// The completion signal never arrived; the move was committed anyway.
    StalledTransition {
        row: RowId,
        transition: TransitionId,
        waited_ms: u64,
    },
    PaginationChanged { row: RowId, pagination: Pagination },
    ItemsPerRowChanged { items_per_row: usize },
    FocusItem { element: ElementId },
    Preview(PreviewEvent),
    BillboardAutoplay { enabled: bool },
}

impl From<PreviewEvent> for CatalogEffect {
    fn from(event: PreviewEvent) -> Self {
        CatalogEffect::Preview(event)
    }
}
