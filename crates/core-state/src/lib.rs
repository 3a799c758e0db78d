//! Buffer model: document text plus cursor, scroll offset and selection.
//!
//! `BufferModel::apply` is the single mutation entry point. It is total: every
//! `KeyEvent` is accepted and every computed cursor or scroll value is clamped
//! where it is produced.
//!
//! Invariants (hold after every public call):
//! - the buffer has at least one line;
//! - `cursor.row < line_count` and `cursor.col <= line_len(cursor.row)`;
//! - `scroll <= last_row` except through `set_scroll`, which callers use only in
//!   tests; rendering tolerates any value.
//!
//! Scrolling follows the cursor one row at a time. After a downward move the
//! offset grows by one when the cursor comes within `scroll_margin` rows of
//! the bottom edge of a `viewport_height`-row screen; after an upward move it
//! shrinks by one when the cursor comes within `scroll_margin` rows of the top.

use core_text::{Buffer, Position};
use std::path::PathBuf;

mod dispatch;
pub mod selection;

pub use dispatch::DispatchResult;
pub use selection::SelectionModel;

pub const DEFAULT_SCROLL_MARGIN: usize = 5;
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Tunables applied by `apply`; sourced from configuration by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPolicy {
    pub scroll_margin: usize,
    /// Spaces inserted by Tab and removed by a de-indenting Backspace.
    pub tab_width: usize,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

pub struct BufferModel {
    buffer: Buffer,
    cursor: Position,
    scroll: usize,
    selection: SelectionModel,
    /// Terminal rows (status line included), as used by the scroll policy.
    viewport_height: usize,
    policy: EditPolicy,
    pub file_name: Option<PathBuf>,
    /// Text changed since load or the last successful save.
    pub modified: bool,
    status_message: Option<String>,
}

impl BufferModel {
    pub fn new(buffer: Buffer, viewport_height: usize) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            scroll: 0,
            selection: SelectionModel::default(),
            viewport_height,
            policy: EditPolicy::default(),
            file_name: None,
            modified: false,
            status_message: None,
        }
    }

    pub fn with_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Normalized `(start, end)` of a non-empty selection.
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        self.selection.range(self.cursor)
    }

    /// Terminal resized; the new height applies to subsequent moves.
    pub fn set_viewport_height(&mut self, rows: usize) {
        self.viewport_height = rows;
    }

    pub fn set_policy(&mut self, policy: EditPolicy) {
        self.policy = policy;
    }

    /// Place the cursor, clamped into the buffer.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.buffer.clamp(pos);
    }

    pub fn set_scroll(&mut self, scroll: usize) {
        self.scroll = scroll;
    }

    /// Message shown in the status line until the next key.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Base file name for display.
    pub fn display_name(&self) -> &str {
        self.file_name
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or("[No Name]")
    }

    fn follow_down(&mut self) {
        if self.cursor.row + self.policy.scroll_margin > self.scroll + self.viewport_height {
            self.scroll += 1;
        }
    }

    fn follow_up(&mut self) {
        if self.cursor.row < self.scroll + self.policy.scroll_margin {
            self.scroll = self.scroll.saturating_sub(1);
        }
    }
}
