//! Catalog focus controller
//!
//! Tracks which row receives arrow-key paging and which title card holds
//! keyboard focus.
//!
//! Resolution order for the paging target:
//! 1. `hovered_row` - the row under the pointer
//! 2. `keyboard_active_row` - the row last paged with its arrows or keyboard

use cinerow_model::{ElementId, RowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusSource {
    #[default]
    None,
    Mouse,
    Keyboard,
}

#[derive(Debug, Default, Clone)]
pub struct CatalogFocus {
    pub hovered_row: Option<RowId>,
    pub keyboard_active_row: Option<RowId>,
    /// Card that last received programmatic focus.
    pub focused: Option<ElementId>,
    pub last_source: FocusSource,
}

impl CatalogFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hovered(&mut self, row: Option<RowId>) {
        if row.is_some() {
            self.last_source = FocusSource::Mouse;
        }
        self.hovered_row = row;
    }

    pub fn set_keyboard_active(&mut self, row: Option<RowId>) {
        self.keyboard_active_row = row;
        self.last_source = FocusSource::Keyboard;
    }

    /// Row that arrow keys should page.
    pub fn active_row(&self) -> Option<RowId> {
        self.hovered_row.or(self.keyboard_active_row)
    }

    pub fn is_active(&self, row: RowId) -> bool {
        self.active_row() == Some(row)
    }

    pub fn focus_element(&mut self, element: ElementId) {
        self.keyboard_active_row = Some(element.row);
        self.focused = Some(element);
    }

    /// Drop every reference to `row` (row removed from the page).
    pub fn forget_row(&mut self, row: RowId) {
        if self.hovered_row == Some(row) {
            self.hovered_row = None;
        }
        if self.keyboard_active_row == Some(row) {
            self.keyboard_active_row = None;
        }
        if self.focused.as_ref().is_some_and(|el| el.row == row) {
            self.focused = None;
        }
    }

    pub fn clear_hover(&mut self) {
        self.hovered_row = None;
    }

    pub fn clear_all(&mut self) {
        self.hovered_row = None;
        self.keyboard_active_row = None;
        self.focused = None;
        self.last_source = FocusSource::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_takes_priority_over_keyboard() {
        let mut focus = CatalogFocus::new();
        focus.set_keyboard_active(Some(RowId(1)));
        assert_eq!(focus.active_row(), Some(RowId(1)));
        focus.set_hovered(Some(RowId(2)));
        assert!(focus.is_active(RowId(2)));
        focus.clear_hover();
        assert_eq!(focus.active_row(), Some(RowId(1)));
    }

    #[test]
    fn forgetting_a_row_clears_its_focus() {
        let mut focus = CatalogFocus::new();
        focus.focus_element(ElementId::new(RowId(3), "show-9"));
        focus.forget_row(RowId(3));
        assert_eq!(focus.active_row(), None);
        assert_eq!(focus.focused, None);
    }
}
