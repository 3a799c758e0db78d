//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair. Every helper keeps
//! the position inside the buffer: rows in `[0, last_row]`, columns in
//! `[0, line_len(row)]`.

use crate::{Buffer, Position};

/// Word characters are alphanumerics and `_`; everything else is one class.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Move left one character, stopping at the line start.
pub fn left(_buf: &Buffer, pos: &mut Position) {
    pos.col = pos.col.saturating_sub(1);
}

/// Move right one character, stopping at the line end.
pub fn right(buf: &Buffer, pos: &mut Position) {
    pos.col = (pos.col + 1).min(buf.line_len(pos.row));
}

pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.col = 0;
}

pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.col = buf.line_len(pos.row);
}

/// Move up one row and clamp the column to the destination line. Returns
/// false when already on the first row (the column is still clamped).
pub fn up(buf: &Buffer, pos: &mut Position) -> bool {
    let moved = pos.row > 0;
    pos.row = pos.row.saturating_sub(1);
    clamp_col(buf, pos);
    moved
}

/// Move down one row and clamp the column to the destination line.
pub fn down(buf: &Buffer, pos: &mut Position) -> bool {
    let moved = pos.row < buf.last_row();
    pos.row = (pos.row + 1).min(buf.last_row());
    clamp_col(buf, pos);
    moved
}

/// Column never exceeds the line length; the previous column is not
/// remembered once clamped.
pub fn clamp_col(buf: &Buffer, pos: &mut Position) {
    pos.col = pos.col.min(buf.line_len(pos.row));
}

/// Step right once, then keep stepping while the character under the cursor
/// has the class of the first character reached. Started inside a word this
/// stops at the next class boundary.
pub fn word_right(buf: &Buffer, pos: &mut Position) {
    right(buf, pos);
    let Some(class) = class_at(buf, *pos) else {
        return;
    };
    while class_at(buf, *pos) == Some(class) {
        right(buf, pos);
    }
}

/// Mirror of `word_right`; never steps past column 0.
pub fn word_left(buf: &Buffer, pos: &mut Position) {
    left(buf, pos);
    let Some(class) = class_at(buf, *pos) else {
        return;
    };
    while pos.col > 0 && class_at(buf, *pos) == Some(class) {
        left(buf, pos);
    }
}

fn class_at(buf: &Buffer, pos: Position) -> Option<bool> {
    buf.char_at(pos).map(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().copied())
    }

    #[test]
    fn word_right_walks_class_runs() {
        let b = buf(&["foo  bar"]);
        let mut pos = Position::origin();
        word_right(&b, &mut pos);
        assert_eq!(pos.col, 3);
        word_right(&b, &mut pos);
        assert_eq!(pos.col, 5);
        word_right(&b, &mut pos);
        assert_eq!(pos.col, 8);
        word_right(&b, &mut pos);
        assert_eq!(pos.col, 8, "line end is a fixed point");
    }

    #[test]
    fn word_left_stops_on_class_change() {
        let b = buf(&["foo  bar"]);
        let mut pos = Position::new(0, 8);
        word_left(&b, &mut pos);
        assert_eq!(pos.col, 4);
        word_left(&b, &mut pos);
        assert_eq!(pos.col, 2);
        word_left(&b, &mut pos);
        assert_eq!(pos.col, 0);
        word_left(&b, &mut pos);
        assert_eq!(pos.col, 0);
    }

    #[test]
    fn underscore_counts_as_word() {
        let b = buf(&["a_b c"]);
        let mut pos = Position::origin();
        word_right(&b, &mut pos);
        assert_eq!(pos.col, 3);
    }

    #[test]
    fn word_motion_on_long_line_is_iterative() {
        let long = "x".repeat(200_000);
        let b = buf(&[long.as_str()]);
        let mut pos = Position::origin();
        word_right(&b, &mut pos);
        assert_eq!(pos.col, 200_000);
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let b = buf(&["abcdef", "ab", "abcdef"]);
        let mut pos = Position::new(0, 5);
        assert!(down(&b, &mut pos));
        assert_eq!(pos, Position::new(1, 2));
        assert!(down(&b, &mut pos));
        assert_eq!(pos, Position::new(2, 2), "column is not restored");
        assert!(!down(&b, &mut pos));
        assert!(up(&b, &mut pos));
        assert!(up(&b, &mut pos));
        assert!(!up(&b, &mut pos));
        assert_eq!(pos.row, 0);
    }

    #[test]
    fn horizontal_moves_are_bounded() {
        let b = buf(&["ab"]);
        let mut pos = Position::origin();
        left(&b, &mut pos);
        assert_eq!(pos.col, 0);
        right(&b, &mut pos);
        right(&b, &mut pos);
        right(&b, &mut pos);
        assert_eq!(pos.col, 2);
        line_start(&b, &mut pos);
        assert_eq!(pos.col, 0);
        line_end(&b, &mut pos);
        assert_eq!(pos.col, 2);
    }
}
