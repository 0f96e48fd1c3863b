//! Cursor arithmetic and offsets for page moves.
//!
//! Offsets are expressed in percent of the row width, so one item is
//! `100 / items_per_row` percent wide. The canonical offset of a settled row
//! translates the mounted slice left by exactly the items mounted before the
//! cursor.

use super::types::Direction;

/// Width of one item in percent of the row.
#[inline]
pub fn item_percent(items_per_row: usize) -> f32 {
    100.0 / items_per_row.max(1) as f32
}

/// Offset of a settled row whose slice carries `lead` items before the cursor.
#[inline]
pub fn settled_offset(lead: usize, items_per_row: usize) -> f32 {
    lead as f32 * item_percent(items_per_row)
}

/// Offset at the end of a move of `distance` items in `direction`.
#[inline]
pub fn transition_offset(
    settled: f32,
    direction: Direction,
    distance: usize,
    items_per_row: usize,
) -> f32 {
    let delta = distance as f32 * item_percent(items_per_row);
    match direction {
        Direction::Next => settled + delta,
        Direction::Prev => settled - delta,
    }
}

/// Row-level cursor rules shared by both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub total: usize,
    pub items_per_row: usize,
    pub lowest: usize,
    pub has_moved_once: bool,
    pub looping: bool,
}

impl Cursor {
    fn last_page_start(&self) -> usize {
        self.total.saturating_sub(self.items_per_row)
    }

    pub fn has_more_next_pages(&self) -> bool {
        if self.total <= self.items_per_row {
            return false;
        }
        self.looping || self.lowest + self.items_per_row < self.total
    }

    pub fn has_more_prev_pages(&self) -> bool {
        if self.total <= self.items_per_row {
            return false;
        }
        if self.looping {
            self.has_moved_once || self.lowest > 0
        } else {
            self.lowest > 0
        }
    }

    /// Cursor after a `Next` move. Does not check `has_more_next_pages`.
    pub fn next_index(&self) -> usize {
        let last = self.last_page_start();
        if self.looping && self.lowest >= last {
            0
        } else if self.lowest + self.items_per_row > last {
            last
        } else {
            self.lowest + self.items_per_row
        }
    }

    /// Cursor after a `Prev` move. Does not check `has_more_prev_pages`.
    pub fn prev_index(&self) -> usize {
        if self.lowest > 0 && self.lowest < self.items_per_row {
            0
        } else if self.lowest == 0 {
            self.last_page_start()
        } else {
            self.lowest - self.items_per_row
        }
    }

    /// Items travelled from `lowest` to `to`, following wraparound.
    pub fn distance(&self, direction: Direction, to: usize) -> usize {
        match direction {
            Direction::Next if to > self.lowest => to - self.lowest,
            Direction::Next => self.total - self.lowest + to,
            Direction::Prev if to < self.lowest => self.lowest - to,
            Direction::Prev => self.lowest + self.total - to,
        }
    }

    pub fn target(&self, direction: Direction) -> usize {
        match direction {
            Direction::Next => self.next_index(),
            Direction::Prev => self.prev_index(),
        }
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Next => self.has_more_next_pages(),
            Direction::Prev => self.has_more_prev_pages(),
        }
    }
}
