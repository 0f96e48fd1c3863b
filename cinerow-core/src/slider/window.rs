//! Mounted-slice planning for a row.
//!
//! A settled row mounts, around the cursor `lowest`:
//!
//! - up to one previous page plus its peek (`ipr + 1` items) before the cursor,
//! - two pages plus two trailing items from the cursor on (`2 * ipr + 2`).
//!
//! The leading part only exists once the row has moved (or the cursor is past
//! zero). Looping rows that run short on either side splice items cyclically
//! from the opposite end of the list.

use std::ops::Range;
use std::sync::Arc;

use cinerow_model::MediaItem;

use super::types::{PositionedItem, Splice, ViewportPosition};

/// Which source ranges make up the mounted slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPlan {
    /// Tail items spliced before the start.
    pub prepended: usize,
    /// Items mounted from their own position.
    pub source: Range<usize>,
    /// Head items spliced after the end.
    pub appended: usize,
}

impl WindowPlan {
    pub fn len(&self) -> usize {
        self.prepended + self.source.len() + self.appended
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inputs that fully determine a row's mounted slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub total: usize,
    pub items_per_row: usize,
    pub lowest: usize,
    pub has_moved_once: bool,
    /// Looping in effect (already gated on `total > items_per_row`).
    pub looping: bool,
}

impl WindowGeometry {
    /// Items wanted before the cursor.
    fn leading_wanted(&self) -> usize {
        if self.has_moved_once || self.lowest > 0 {
            self.items_per_row + 1
        } else {
            0
        }
    }

    /// Items wanted from the cursor on, cursor included.
    fn trailing_wanted(&self) -> usize {
        2 * self.items_per_row + 2
    }

    pub fn plan(&self) -> WindowPlan {
        if self.total == 0 {
            return WindowPlan {
                prepended: 0,
                source: 0..0,
                appended: 0,
            };
        }

        let lowest = self.lowest.min(self.total - 1);
        let leading = self.leading_wanted();
        let start = lowest.saturating_sub(leading);
        let end = (lowest + self.trailing_wanted()).min(self.total);

        let (prepended, appended) = if self.looping {
            let lead_short = leading - (lowest - start);
            let prepended = if self.has_moved_once || lowest > 0 {
                lead_short
            } else {
                0
            };
            let appended =
                (lowest + self.trailing_wanted()).saturating_sub(self.total);
            (prepended.min(self.total), appended.min(self.total))
        } else {
            (0, 0)
        };

        WindowPlan {
            prepended,
            source: start..end,
            appended,
        }
    }
}

/// A built slice with the bookkeeping needed for offsets and refocus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountedWindow {
    pub items: Vec<PositionedItem>,
    /// Mounted items before the first visible one.
    pub lead: usize,
    /// Number of fully visible items.
    pub visible: usize,
}

impl MountedWindow {
    /// Item at `viewport_index` within the visible set.
    pub fn visible_item(&self, viewport_index: usize) -> Option<&PositionedItem> {
        if viewport_index >= self.visible {
            return None;
        }
        self.items.get(self.lead + viewport_index)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.iter().any(|item| item.key == key)
    }
}

/// Build the positioned slice for `geometry` over `items`.
pub fn build_window(
    items: &[Arc<MediaItem>],
    geometry: WindowGeometry,
) -> MountedWindow {
    debug_assert_eq!(items.len(), geometry.total);
    let plan = geometry.plan();
    if plan.is_empty() {
        return MountedWindow::default();
    }

    let total = geometry.total;
    let mut sources: Vec<(usize, Splice)> = Vec::with_capacity(plan.len());
    sources.extend(
        (total - plan.prepended..total).map(|idx| (idx, Splice::Prepended)),
    );
    sources.extend(plan.source.clone().map(|idx| (idx, Splice::Source)));
    sources.extend((0..plan.appended).map(|idx| (idx, Splice::Appended)));

    let lowest = geometry.lowest.min(total - 1);
    let lead = plan.prepended + (lowest - plan.source.start);
    let visible = geometry.items_per_row.min(sources.len() - lead);

    let items = sources
        .into_iter()
        .enumerate()
        .map(|(slot, (source_index, splice))| {
            let item = Arc::clone(&items[source_index]);
            let viewport_position = tag_position(slot, lead, visible);
            let viewport_index = (slot >= lead && slot < lead + visible)
                .then(|| slot - lead);
            let tabbable = viewport_position.is_tabbable();
            PositionedItem {
                key: format!("{}{}", item.key(), splice.key_suffix()),
                item,
                source_index,
                splice,
                viewport_position,
                viewport_index,
                tabbable,
                aria_hidden: !tabbable,
            }
        })
        .collect();

    MountedWindow {
        items,
        lead,
        visible,
    }
}

fn tag_position(slot: usize, lead: usize, visible: usize) -> ViewportPosition {
    if visible == 0 {
        return ViewportPosition::Offscreen;
    }
    let last_visible = lead + visible - 1;
    if slot == lead {
        ViewportPosition::LeftEdge
    } else if slot + 1 == lead {
        ViewportPosition::LeftPeek
    } else if slot == last_visible {
        ViewportPosition::RightEdge
    } else if slot == last_visible + 1 {
        ViewportPosition::RightPeek
    } else if slot > lead && slot < last_visible {
        ViewportPosition::Middle
    } else {
        ViewportPosition::Offscreen
    }
}
