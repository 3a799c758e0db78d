//! Rope-backed line store.
//!
//! Lines are separated by `\n` only (ropey is built without CR / Unicode line
//! break recognition), so `line_count` is always the number of `\n` bytes plus
//! one. A file ending in `\n` therefore has a trailing empty line, and writing
//! the rope back out reproduces the original bytes exactly.
//!
//! Columns are character offsets within a line and never include the line
//! separator. The editor targets ASCII text, where a character is one byte.

use ropey::Rope;

pub mod io;
pub mod motion;

pub use io::{TextError, load, save};

/// A position inside a buffer: (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// The document: an ordered, never-empty sequence of lines.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// A buffer holding a single empty line.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_text(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Build from separate lines (joined with `\n`).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&joined)
    }

    /// Total number of lines; at least 1.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn last_row(&self) -> usize {
        self.line_count() - 1
    }

    /// The nearest position inside the buffer.
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.last_row());
        Position::new(row, pos.col.min(self.line_len(row)))
    }

    /// Character length of a line excluding its separator; 0 for rows out of range.
    pub fn line_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(row);
        let n = line.len_chars();
        if n > 0 && line.char(n - 1) == '\n' {
            n - 1
        } else {
            n
        }
    }

    /// Line content without its separator.
    pub fn line(&self, row: usize) -> Option<String> {
        if row >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(row).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// All lines without separators, in document order.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|row| self.line(row))
            .collect()
    }

    /// Character under `pos`; `None` at or past the end of the line.
    pub fn char_at(&self, pos: Position) -> Option<char> {
        if pos.col >= self.line_len(pos.row) {
            return None;
        }
        Some(self.rope.char(self.char_index(pos)))
    }

    /// Insert a character at `pos` and advance the column past it.
    pub fn insert_char(&mut self, pos: &mut Position, ch: char) {
        let idx = self.char_index(*pos);
        self.rope.insert_char(idx, ch);
        pos.col += 1;
    }

    /// Split the line at `pos`; the right part becomes the next line and `pos`
    /// moves to its start.
    pub fn split_line(&mut self, pos: &mut Position) {
        let idx = self.char_index(*pos);
        self.rope.insert_char(idx, '\n');
        pos.row += 1;
        pos.col = 0;
    }

    /// Append line `pos.row` onto the previous line. `pos` moves to the join
    /// column. Returns false (and does nothing) on the first row.
    pub fn join_with_previous(&mut self, pos: &mut Position) -> bool {
        if pos.row == 0 {
            return false;
        }
        let prev = pos.row - 1;
        let join_col = self.line_len(prev);
        let newline = self.rope.line_to_char(prev) + join_col;
        self.rope.remove(newline..newline + 1);
        pos.row = prev;
        pos.col = join_col;
        true
    }

    /// Delete up to `count` characters before `pos` without crossing the line
    /// start. Returns how many were removed.
    pub fn delete_before(&mut self, pos: &mut Position, count: usize) -> usize {
        let n = count.min(pos.col);
        if n == 0 {
            return 0;
        }
        let end = self.char_index(*pos);
        self.rope.remove(end - n..end);
        pos.col -= n;
        n
    }

    /// The characters in `[pos.col - count, pos.col)` of the line, when that
    /// many exist.
    pub fn text_before(&self, pos: Position, count: usize) -> Option<String> {
        if count > pos.col || pos.col > self.line_len(pos.row) {
            return None;
        }
        let end = self.char_index(pos);
        Some(self.rope.slice(end - count..end).to_string())
    }

    /// Full document text, lines joined with `\n`.
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub(crate) fn rope(&self) -> &Rope {
        &self.rope
    }

    fn char_index(&self, pos: Position) -> usize {
        self.rope.line_to_char(pos.row) + pos.col
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.rope == other.rope
    }
}

impl Eq for Buffer {}
