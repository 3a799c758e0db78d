//! Key dispatch: maps one `KeyEvent` onto the model.
//!
//! Motions and edits are split into separate handlers. Both operate on a copy
//! of the cursor and write it back, so a handler never leaves the model with a
//! half-updated position.

use crate::BufferModel;
use core_events::KeyEvent;
use core_text::{Position, motion};

/// Outcome of applying a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Screen needs redrawing.
    pub dirty: bool,
    /// Buffer text changed.
    pub modified: bool,
    /// Caller should write the buffer to disk.
    pub save_requested: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self {
            dirty: false,
            modified: false,
            save_requested: false,
        }
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            modified: false,
            save_requested: false,
        }
    }
    pub fn modified() -> Self {
        Self {
            dirty: true,
            modified: true,
            save_requested: false,
        }
    }
    pub fn save() -> Self {
        Self {
            dirty: true,
            modified: false,
            save_requested: true,
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
    Horizontal,
}

impl BufferModel {
    /// Apply one key. Total: unknown or meaningless keys are no-ops.
    pub fn apply(&mut self, key: KeyEvent) -> DispatchResult {
        tracing::debug!(target: "actions.dispatch", %key, "key");
        // Dropping a visible message or selection changes the screen even
        // when the key itself does nothing.
        let cleared = self.status_message.take().is_some() || self.selection_range().is_some();

        if key.is_selection_extend() {
            if !self.selection.active {
                self.selection.begin(self.cursor);
            }
        } else {
            self.selection.clear();
        }

        use KeyEvent::*;
        let mut result = match key {
            Left | ShiftLeft => self.handle_motion(Direction::Horizontal, motion::left),
            Right | ShiftRight => self.handle_motion(Direction::Horizontal, motion::right),
            Up | ShiftUp => self.handle_motion(Direction::Up, |b, p| {
                motion::up(b, p);
            }),
            Down | ShiftDown => self.handle_motion(Direction::Down, |b, p| {
                motion::down(b, p);
            }),
            Home => self.handle_motion(Direction::Horizontal, motion::line_start),
            End => self.handle_motion(Direction::Horizontal, motion::line_end),
            CtrlLeft => self.handle_motion(Direction::Horizontal, motion::word_left),
            CtrlRight => self.handle_motion(Direction::Horizontal, motion::word_right),
            PageUp => {
                self.scroll = self.scroll.saturating_sub(1);
                DispatchResult::dirty()
            }
            PageDown => {
                self.scroll = (self.scroll + 1).min(self.buffer.last_row());
                DispatchResult::dirty()
            }
            Char('\n') | Newline => self.handle_newline(),
            Char(c) => self.handle_insert(c),
            Tab => self.handle_tab(),
            Backspace => self.handle_backspace(),
            Save => DispatchResult::save(),
            ShiftTab | AltTab | Alt(_) | Ctrl(_) | AltUp | AltDown | AltLeft | AltRight
            | CtrlUp | CtrlDown | Unknown => DispatchResult::clean(),
        };
        if result.modified {
            self.modified = true;
        }
        result.dirty |= cleared;
        result
    }

    fn handle_motion<F>(&mut self, dir: Direction, step: F) -> DispatchResult
    where
        F: FnOnce(&core_text::Buffer, &mut Position),
    {
        let before = self.cursor;
        let mut pos = self.cursor;
        step(&self.buffer, &mut pos);
        self.cursor = pos;
        match dir {
            Direction::Down => self.follow_down(),
            Direction::Up => self.follow_up(),
            Direction::Horizontal => {}
        }
        tracing::trace!(
            target: "actions.dispatch",
            from_row = before.row,
            from_col = before.col,
            to_row = pos.row,
            to_col = pos.col,
            scroll = self.scroll,
            "motion"
        );
        DispatchResult::dirty()
    }

    fn handle_insert(&mut self, c: char) -> DispatchResult {
        let mut pos = self.cursor;
        self.buffer.insert_char(&mut pos, c);
        self.cursor = pos;
        tracing::trace!(target: "actions.dispatch", op = "insert", ch = %c, row = pos.row, col = pos.col, "edit");
        DispatchResult::modified()
    }

    fn handle_tab(&mut self) -> DispatchResult {
        let mut pos = self.cursor;
        for _ in 0..self.policy.tab_width {
            self.buffer.insert_char(&mut pos, ' ');
        }
        self.cursor = pos;
        tracing::trace!(target: "actions.dispatch", op = "tab", row = pos.row, col = pos.col, "edit");
        DispatchResult::modified()
    }

    fn handle_newline(&mut self) -> DispatchResult {
        let mut pos = self.cursor;
        self.buffer.split_line(&mut pos);
        self.cursor = pos;
        self.follow_down();
        tracing::trace!(target: "actions.dispatch", op = "newline", row = pos.row, "edit");
        DispatchResult::modified()
    }

    fn handle_backspace(&mut self) -> DispatchResult {
        let mut pos = self.cursor;
        if pos.col == 0 {
            if !self.buffer.join_with_previous(&mut pos) {
                return DispatchResult::clean();
            }
            self.cursor = pos;
            self.follow_up();
            tracing::trace!(target: "actions.dispatch", op = "join", row = pos.row, col = pos.col, "edit");
            return DispatchResult::modified();
        }
        let width = self.policy.tab_width;
        let indent = self
            .buffer
            .text_before(pos, width)
            .is_some_and(|s| s.chars().all(|c| c == ' '));
        let removed = self
            .buffer
            .delete_before(&mut pos, if indent { width } else { 1 });
        self.cursor = pos;
        tracing::trace!(target: "actions.dispatch", op = "backspace", removed, row = pos.row, col = pos.col, "edit");
        DispatchResult::modified()
    }
}
