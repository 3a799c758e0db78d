//! Extend-by-anchor selection.
//!
//! The model stores only the anchor; the moving end is always the cursor.
//! Selections are display-only and never alter buffer text.

use core_text::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    pub active: bool,
    pub anchor: Position,
}

impl SelectionModel {
    pub fn begin(&mut self, anchor: Position) {
        self.active = true;
        self.anchor = anchor;
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    /// `(start, end)` with `start <= end`, or `None` when inactive or empty.
    pub fn range(&self, cursor: Position) -> Option<(Position, Position)> {
        if !self.active || self.anchor == cursor {
            return None;
        }
        Some((self.anchor.min(cursor), self.anchor.max(cursor)))
    }
}
