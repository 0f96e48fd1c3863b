//! SliderState: one row's cursor, in-flight transition and mounted window

use std::sync::Arc;
use std::time::Duration;

use cinerow_model::{MediaItem, RowId};

use super::navigation::{Cursor, settled_offset, transition_offset};
use super::types::{
    CommittedMove, Direction, Pagination, PositionedItem, Transition,
    TransitionId, ViewportWindow,
};
use super::window::{MountedWindow, WindowGeometry, build_window};
use crate::error::{CoreError, Result, SliderFault};

#[derive(Debug, Clone)]
pub struct SliderState {
    row: RowId,

    // Content
    items: Vec<Arc<MediaItem>>,

    // Layout
    items_per_row: usize,
    loop_enabled: bool,

    // Cursor
    lowest_visible_index: usize,
    has_moved_once: bool,

    // Motion
    in_flight: Option<Transition>,
    next_transition: u64,

    // Derived
    window: MountedWindow,
}

impl SliderState {
    pub fn new(
        row: RowId,
        items: Vec<Arc<MediaItem>>,
        items_per_row: usize,
        loop_enabled: bool,
    ) -> Result<Self> {
        Self::with_cursor(row, items, items_per_row, loop_enabled, 0)
    }

    /// Create a row positioned at `lowest_visible_index`.
    pub fn with_cursor(
        row: RowId,
        items: Vec<Arc<MediaItem>>,
        items_per_row: usize,
        loop_enabled: bool,
        lowest_visible_index: usize,
    ) -> Result<Self> {
        if items_per_row == 0 {
            return Err(CoreError::InvalidItemsPerRow);
        }
        let total = items.len();
        if lowest_visible_index > 0 && lowest_visible_index >= total {
            return Err(CoreError::CursorOutOfRange {
                cursor: lowest_visible_index,
                total,
            });
        }
        // A cursor inside the last page snaps to its canonical start.
        let lowest_visible_index =
            lowest_visible_index.min(total.saturating_sub(items_per_row));
        let mut state = Self {
            row,
            items,
            items_per_row,
            loop_enabled,
            lowest_visible_index,
            has_moved_once: false,
            in_flight: None,
            next_transition: 0,
            window: MountedWindow::default(),
        };
        state.recompute_window();
        Ok(state)
    }

    pub fn row(&self) -> RowId {
        self.row
    }

    pub fn items(&self) -> &[Arc<MediaItem>] {
        &self.items
    }

    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    pub fn lowest_visible_index(&self) -> usize {
        self.lowest_visible_index
    }

    pub fn has_moved_once(&self) -> bool {
        self.has_moved_once
    }

    /// Looping only matters once there is more than one page.
    pub fn is_looping(&self) -> bool {
        self.loop_enabled && self.items.len() > self.items_per_row
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    pub fn positioned_items(&self) -> &[PositionedItem] {
        &self.window.items
    }

    pub fn mounted(&self) -> &MountedWindow {
        &self.window
    }

    pub fn has_more_next_pages(&self) -> bool {
        self.cursor().has_more_next_pages()
    }

    pub fn has_more_prev_pages(&self) -> bool {
        self.cursor().has_more_prev_pages()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.lowest_visible_index,
            self.items_per_row,
            self.items.len(),
        )
    }

    /// Canonical offset of the settled slice.
    pub fn settled_offset(&self) -> f32 {
        settled_offset(self.window.lead, self.items_per_row)
    }

    pub fn viewport_window(&self) -> ViewportWindow {
        let highest_index = self
            .window
            .visible
            .checked_sub(1)
            .and_then(|last| self.window.visible_item(last))
            .map(|item| item.source_index)
            .unwrap_or(self.lowest_visible_index);
        ViewportWindow {
            lowest_index: self.lowest_visible_index,
            highest_index,
            offset_percent: self.settled_offset(),
            items_per_row: self.items_per_row,
            total_items: self.items.len(),
            has_moved_once: self.has_moved_once,
            loop_enabled: self.is_looping(),
        }
    }

    pub fn advance_next(&mut self) -> Option<Transition> {
        self.advance(Direction::Next)
    }

    pub fn advance_prev(&mut self) -> Option<Transition> {
        self.advance(Direction::Prev)
    }

    /// Start a page move. Returns `None` while another move is in flight or
    /// when there is nowhere to go in `direction`.
    pub fn advance(&mut self, direction: Direction) -> Option<Transition> {
        if let Some(active) = &self.in_flight {
            log::debug!(
                "{}: dropping {:?} while {} is in flight",
                self.row,
                direction,
                active.id
            );
            return None;
        }
        let cursor = self.cursor();
        if !cursor.can_move(direction) {
            return None;
        }

        let to_index = cursor.target(direction);
        let distance = cursor.distance(direction, to_index);
        let from_offset = self.settled_offset();
        let to_offset = transition_offset(
            from_offset,
            direction,
            distance,
            self.items_per_row,
        );

        let transition = Transition {
            id: TransitionId(self.next_transition),
            direction,
            from_index: self.lowest_visible_index,
            to_index,
            distance,
            from_offset,
            to_offset,
        };
        self.next_transition += 1;
        self.in_flight = Some(transition);
        Some(transition)
    }

    /// Commit the in-flight move after the animation layer reports completion.
    ///
    /// Cursor, canonical offset and the animating flag change together. A
    /// completion for any other transition id is ignored.
    pub fn complete_transition(
        &mut self,
        id: TransitionId,
    ) -> Option<CommittedMove> {
        match self.in_flight {
            Some(active) if active.id == id => Some(self.commit(active)),
            _ => {
                log::debug!("{}: ignoring stale completion for {}", self.row, id);
                None
            }
        }
    }

    /// Force-commit a transition whose completion never arrived.
    pub fn expire_transition(
        &mut self,
        id: TransitionId,
        waited: Duration,
    ) -> Option<(CommittedMove, SliderFault)> {
        let active = self.in_flight.filter(|active| active.id == id)?;
        let fault = SliderFault::StalledTransition {
            row: self.row,
            transition: id,
            waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
        };
        Some((self.commit(active), fault))
    }

    /// Apply a new responsive items-per-row value. Any in-flight move is
    /// dropped, since its offsets were computed for the old geometry.
    pub fn set_items_per_row(&mut self, items_per_row: usize) -> Result<bool> {
        if items_per_row == 0 {
            return Err(CoreError::InvalidItemsPerRow);
        }
        if items_per_row == self.items_per_row {
            return Ok(false);
        }
        if let Some(active) = self.in_flight.take() {
            log::debug!(
                "{}: geometry changed, abandoning {}",
                self.row,
                active.id
            );
        }
        self.items_per_row = items_per_row;
        self.lowest_visible_index = self.clamp_cursor(self.lowest_visible_index);
        self.recompute_window();
        Ok(true)
    }

    /// Replace the row's items (data refresh). The cursor is clamped to the
    /// start of the new last page; an in-flight move commits against the new
    /// bounds.
    pub fn set_items(&mut self, items: Vec<Arc<MediaItem>>) {
        self.items = items;
        self.lowest_visible_index = self.clamp_cursor(self.lowest_visible_index);
        self.recompute_window();
    }

    fn commit(&mut self, active: Transition) -> CommittedMove {
        self.lowest_visible_index = self.clamp_cursor(active.to_index);
        self.has_moved_once = true;
        self.recompute_window();
        self.in_flight = None;

        let refocus_key = self.refocus_key(active.direction);
        CommittedMove {
            transition: active.id,
            direction: active.direction,
            lowest_index: self.lowest_visible_index,
            settled_offset: self.settled_offset(),
            refocus_key,
        }
    }

    /// Second visible item after `Next`, second-to-last after `Prev`, so
    /// repeated keyboard paging keeps moving in the same direction.
    fn refocus_key(&self, direction: Direction) -> Option<String> {
        let visible = self.window.visible;
        if visible == 0 {
            return None;
        }
        let viewport_index = match direction {
            Direction::Next => 1.min(visible - 1),
            Direction::Prev => visible.saturating_sub(2),
        };
        self.window
            .visible_item(viewport_index)
            .map(|item| item.key.clone())
    }

    /// Clamp to the start of the last full page, 0 for single-page rows.
    fn clamp_cursor(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(self.items_per_row))
    }

    fn cursor(&self) -> Cursor {
        Cursor {
            total: self.items.len(),
            items_per_row: self.items_per_row,
            lowest: self.lowest_visible_index,
            has_moved_once: self.has_moved_once,
            looping: self.is_looping(),
        }
    }

    fn recompute_window(&mut self) {
        let geometry = WindowGeometry {
            total: self.items.len(),
            items_per_row: self.items_per_row,
            lowest: self.lowest_visible_index,
            has_moved_once: self.has_moved_once,
            looping: self.is_looping(),
        };
        self.window = build_window(&self.items, geometry);

        log::debug!(
            "{}: window recomputed: {} mounted, lead={}, visible={} (lowest={}, items_per_row={}, total={})",
            self.row,
            self.window.items.len(),
            self.window.lead,
            self.window.visible,
            self.lowest_visible_index,
            self.items_per_row,
            self.items.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::types::ViewportPosition;
    use cinerow_model::{MediaType, VideoId};

    fn items(n: usize) -> Vec<Arc<MediaItem>> {
        (0..n)
            .map(|i| {
                Arc::new(
                    MediaItem::new(
                        VideoId(100 + i as u64),
                        MediaType::Show,
                        format!("Show {i}"),
                    )
                    .unwrap(),
                )
            })
            .collect()
    }

    fn row(n: usize, ipr: usize, looping: bool) -> SliderState {
        SliderState::new(RowId(1), items(n), ipr, looping).unwrap()
    }

    #[test]
    fn rejects_zero_items_per_row() {
        assert_eq!(
            SliderState::new(RowId(1), items(4), 0, false).unwrap_err(),
            CoreError::InvalidItemsPerRow
        );
    }

    #[test]
    fn rejects_cursor_past_the_end() {
        let err = SliderState::with_cursor(RowId(1), items(4), 2, false, 4)
            .unwrap_err();
        assert_eq!(err, CoreError::CursorOutOfRange { cursor: 4, total: 4 });
    }

    #[test]
    fn first_page_scenario() {
        let state = row(20, 6, false);
        let window = state.viewport_window();
        assert_eq!(state.positioned_items().len(), 14);
        assert_eq!(window.lowest_index, 0);
        assert_eq!(window.highest_index, 5);
        assert_eq!(window.offset_percent, 0.0);
        assert_eq!(
            state.positioned_items()[0].viewport_position,
            ViewportPosition::LeftEdge
        );
        assert_eq!(state.pagination(), Pagination {
            current_page: 0,
            total_pages: 4
        });
        assert!(state.pagination().is_visible());
    }

    #[test]
    fn next_commits_only_on_completion() {
        let mut state = row(20, 6, false);
        let transition = state.advance_next().expect("can move");
        assert!(state.is_animating());
        assert_eq!(state.lowest_visible_index(), 0);
        assert_eq!(transition.to_index, 6);
        assert!((transition.to_offset - 100.0).abs() < 1e-3);

        let committed = state.complete_transition(transition.id).unwrap();
        assert!(!state.is_animating());
        assert_eq!(committed.lowest_index, 6);
        assert_eq!(state.viewport_window().highest_index, 11);
        // Six items of the previous page are now mounted before the cursor.
        assert!((committed.settled_offset - 100.0).abs() < 1e-3);
        assert_eq!(committed.refocus_key.as_deref(), Some("show-107"));
    }

    #[test]
    fn moves_are_single_flight() {
        let mut state = row(20, 6, false);
        let first = state.advance_next().unwrap();
        assert!(state.advance_next().is_none());
        assert!(state.advance_prev().is_none());
        state.complete_transition(first.id).unwrap();
        assert_eq!(state.lowest_visible_index(), 6);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut state = row(20, 6, false);
        let first = state.advance_next().unwrap();
        assert!(state.complete_transition(TransitionId(first.id.0 + 1)).is_none());
        assert!(state.is_animating());
    }

    #[test]
    fn expiry_force_commits_and_reports() {
        let mut state = row(20, 6, false);
        let t = state.advance_next().unwrap();
        let (committed, fault) = state
            .expire_transition(t.id, Duration::from_millis(1500))
            .unwrap();
        assert_eq!(committed.lowest_index, 6);
        assert!(!state.is_animating());
        assert_eq!(fault, SliderFault::StalledTransition {
            row: RowId(1),
            transition: t.id,
            waited_ms: 1500,
        });
        // A late completion after the forced commit does nothing.
        assert!(state.complete_transition(t.id).is_none());
        assert!(state.expire_transition(t.id, Duration::ZERO).is_none());
    }

    #[test]
    fn prev_refocuses_second_to_last_visible() {
        let mut state =
            SliderState::with_cursor(RowId(1), items(20), 6, false, 12)
                .unwrap();
        let t = state.advance_prev().unwrap();
        let committed = state.complete_transition(t.id).unwrap();
        assert_eq!(committed.lowest_index, 6);
        // Visible 6..12, second-to-last is source 10.
        assert_eq!(committed.refocus_key.as_deref(), Some("show-110"));
    }

    #[test]
    fn looping_row_wraps_forward() {
        let mut state = row(8, 6, true);
        assert!(state.has_more_next_pages());
        assert!(!state.has_more_prev_pages());

        let t = state.advance_next().unwrap();
        state.complete_transition(t.id).unwrap();
        assert_eq!(state.lowest_visible_index(), 2);

        let t = state.advance_next().unwrap();
        assert_eq!(t.to_index, 0);
        assert_eq!(t.distance, 6);
        state.complete_transition(t.id).unwrap();
        assert_eq!(state.lowest_visible_index(), 0);
        assert!(state.has_more_prev_pages());
        assert!(
            state
                .positioned_items()
                .iter()
                .any(|item| item.key.ends_with("_prepended"))
        );
    }

    #[test]
    fn resize_abandons_in_flight_move() {
        let mut state = row(20, 6, false);
        let t = state.advance_next().unwrap();
        assert!(state.set_items_per_row(4).unwrap());
        assert!(!state.is_animating());
        assert!(state.complete_transition(t.id).is_none());
        assert_eq!(state.positioned_items().len(), 10);
        assert!(!state.set_items_per_row(4).unwrap());
        assert!(state.set_items_per_row(0).is_err());
    }

    #[test]
    fn shrinking_items_clamps_cursor() {
        let mut state =
            SliderState::with_cursor(RowId(1), items(20), 6, false, 14)
                .unwrap();
        state.set_items(items(10));
        assert_eq!(state.lowest_visible_index(), 4);
        assert_eq!(state.mounted().visible, 6);
        assert!(state.has_more_prev_pages());

        // Down to a single page: every item is reachable again.
        state.set_items(items(5));
        assert_eq!(state.lowest_visible_index(), 0);
        assert_eq!(state.mounted().visible, 5);
        assert_eq!(state.pagination(), Pagination {
            current_page: 0,
            total_pages: 1
        });

        state.set_items(Vec::new());
        assert_eq!(state.lowest_visible_index(), 0);
        assert!(state.positioned_items().is_empty());
        assert!(!state.has_more_next_pages());
    }

    #[test]
    fn cursor_inside_the_last_page_snaps_to_its_start() {
        let state =
            SliderState::with_cursor(RowId(1), items(20), 6, false, 17)
                .unwrap();
        assert_eq!(state.lowest_visible_index(), 14);
        assert_eq!(state.mounted().visible, 6);
    }

    #[test]
    fn wider_rows_pull_the_cursor_back_to_a_full_page() {
        let mut state =
            SliderState::with_cursor(RowId(1), items(20), 4, false, 16)
                .unwrap();
        assert!(state.set_items_per_row(6).unwrap());
        assert_eq!(state.lowest_visible_index(), 14);
        assert_eq!(state.mounted().visible, 6);
        assert!(!state.has_more_next_pages());
    }

    #[test]
    fn looping_row_placed_mid_list_can_page_back() {
        let mut state =
            SliderState::with_cursor(RowId(1), items(20), 6, true, 6)
                .unwrap();
        assert!(!state.has_moved_once());
        assert!(state.has_more_prev_pages());
        assert!(
            state
                .positioned_items()
                .iter()
                .any(|item| item.key == "show-119_prepended")
        );

        let t = state.advance_prev().unwrap();
        state.complete_transition(t.id).unwrap();
        assert_eq!(state.lowest_visible_index(), 0);
    }
}
