//! Shared types for the row slider

use std::sync::Arc;

use cinerow_model::MediaItem;
use serde::{Deserialize, Serialize};

/// Navigation direction of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

/// Where a mounted item sits relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportPosition {
    /// First fully visible item.
    LeftEdge,
    /// Sliver shown left of the first visible item.
    LeftPeek,
    /// Fully visible, neither first nor last.
    Middle,
    /// Last fully visible item.
    RightEdge,
    /// Sliver shown right of the last visible item.
    RightPeek,
    /// Mounted for the next slide but outside the viewport.
    Offscreen,
}

impl ViewportPosition {
    /// Only fully visible items take part in the tab order.
    pub fn is_tabbable(self) -> bool {
        matches!(
            self,
            ViewportPosition::LeftEdge
                | ViewportPosition::Middle
                | ViewportPosition::RightEdge
        )
    }
}

/// How a mounted item relates to the source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Splice {
    /// Item mounted from its own place in the list.
    Source,
    /// Head item repeated after the end of a looping row.
    Appended,
    /// Tail item repeated before the start of a looping row.
    Prepended,
}

impl Splice {
    pub fn key_suffix(self) -> &'static str {
        match self {
            Splice::Source => "",
            Splice::Appended => "_appended",
            Splice::Prepended => "_prepended",
        }
    }
}

/// A mounted item annotated with its viewport role. Rebuilt on every window
/// recomputation, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedItem {
    pub item: Arc<MediaItem>,
    /// Render key, unique within the row even for spliced repeats.
    pub key: String,
    /// Index of the item in the row's source list.
    pub source_index: usize,
    pub splice: Splice,
    pub viewport_position: ViewportPosition,
    /// 0-based position within the visible set; `None` outside it.
    pub viewport_index: Option<usize>,
    pub tabbable: bool,
    /// Hidden from assistive tech so peeks and offscreen items are not read.
    pub aria_hidden: bool,
}

/// Identifies one slide transition of one row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransitionId(pub u64);

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transition#{}", self.0)
    }
}

/// An in-flight slide. The animation layer moves the mounted slice from
/// `from_offset` to `to_offset` and reports completion with `id`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: TransitionId,
    pub direction: Direction,
    pub from_index: usize,
    pub to_index: usize,
    /// Items travelled, including wraparound.
    pub distance: usize,
    /// Percent of row width the slice is translated left before the move.
    pub from_offset: f32,
    /// Percent of row width the slice is translated left after the move.
    pub to_offset: f32,
}

/// Result of committing a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedMove {
    pub transition: TransitionId,
    pub direction: Direction,
    pub lowest_index: usize,
    /// Canonical offset reapplied without animation.
    pub settled_offset: f32,
    /// Key of the item that should receive focus once the DOM settles.
    pub refocus_key: Option<String>,
}

/// Derived description of what a row currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportWindow {
    pub lowest_index: usize,
    pub highest_index: usize,
    /// Canonical (settled) offset in percent of row width.
    pub offset_percent: f32,
    pub items_per_row: usize,
    pub total_items: usize,
    pub has_moved_once: bool,
    /// Whether looping is in effect (enabled and more than one page).
    pub loop_enabled: bool,
}

/// Page indicator data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(lowest_index: usize, items_per_row: usize, total: usize) -> Self {
        let ipr = items_per_row.max(1);
        Self {
            current_page: lowest_index.div_ceil(ipr),
            total_pages: total.div_ceil(ipr),
        }
    }

    /// The indicator is only drawn when there is somewhere to go.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}
