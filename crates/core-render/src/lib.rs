//! Viewport rendering.
//!
//! Every frame is a full redraw: the screen and scrollback are cleared, then
//! each visible row is painted edge to edge so nothing from a previous, longer
//! frame survives. Rendering is split in two pure steps plus the flush:
//!
//! 1. `build_frame` projects the model into a `Frame`, a grid of styled
//!    `Cell`s plus the terminal cursor position.
//! 2. `Frame::emit` translates the grid into `writer::Command`s, coalescing
//!    runs of equal style.
//! 3. `Writer::flush` / `flush_to` queues the crossterm output and flushes
//!    once.
//!
//! Layout: rows `0..height-1` show buffer rows starting at the scroll offset,
//! each behind a right-aligned 1-based line number and a space. The number
//! column is as wide as the largest line number, never less than 4, and the
//! same width places the terminal cursor. The
//! last screen row is the status line. Row background: annotation color if the
//! row has a diagnostic, else the cursor-row color on the cursor row. Selected
//! characters are drawn reversed on top of either.

use anyhow::Result;
use core_lint::Annotations;
use core_state::BufferModel;
use core_terminal::TerminalContext;
use std::io::Write;

pub mod palette;
pub mod status;
pub mod writer;

use palette::{Background, RowStyle};
use status::{StatusContext, build_status};
use writer::Writer;

/// Minimum digits reserved for the line number.
pub const LINE_NUMBER_WIDTH: usize = 4;

/// Columns before the first text character of a `line_count`-line buffer:
/// line number plus a space.
pub fn gutter_width(line_count: usize) -> usize {
    let digits = line_count.checked_ilog10().map_or(1, |d| d as usize + 1);
    digits.max(LINE_NUMBER_WIDTH) + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: RowStyle,
}

impl Cell {
    fn new(ch: char, style: RowStyle) -> Self {
        Self { ch, style }
    }
}

/// One composed screen. Rows past the end of the buffer are empty and are
/// left blank by the preceding clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub rows: Vec<Vec<Cell>>,
    /// Terminal cursor; `None` hides it.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    pub fn row_styles(&self, y: usize) -> Vec<RowStyle> {
        self.rows
            .get(y)
            .map(|r| r.iter().map(|c| c.style).collect())
            .unwrap_or_default()
    }

    pub fn emit(&self) -> Writer {
        let mut w = Writer::new();
        w.hide_cursor();
        w.clear_all();
        for (y, row) in self.rows.iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            w.move_to(0, to_u16(y));
            let mut start = 0;
            while start < row.len() {
                let style = row[start].style;
                let end = row[start..]
                    .iter()
                    .position(|c| c.style != style)
                    .map_or(row.len(), |n| start + n);
                let (fg, bg) = style.colors();
                w.colors(fg, bg);
                w.print(row[start..end].iter().map(|c| c.ch).collect::<String>());
                start = end;
            }
            w.reset_color();
        }
        if let Some((x, y)) = self.cursor {
            w.move_to(x, y);
            w.show_cursor();
        }
        w
    }
}

/// Project the editor state onto a `ctx.width` x `ctx.height` screen.
pub fn build_frame(model: &BufferModel, annotations: &Annotations, ctx: TerminalContext) -> Frame {
    let width = usize::from(ctx.width);
    let height = usize::from(ctx.height);
    let text_rows = ctx.text_rows();
    let buffer = model.buffer();
    let cursor = model.cursor();
    let scroll = model.scroll();
    let selection = model.selection_range();
    let gutter = gutter_width(buffer.line_count());
    let number_width = gutter - 1;

    let mut rows = vec![Vec::new(); height];
    for (y, slot) in rows.iter_mut().enumerate().take(text_rows) {
        let row = scroll + y;
        let Some(line) = buffer.line(row) else {
            break;
        };
        let bg = if annotations.contains(row) {
            Background::Annotated
        } else if row == cursor.row {
            Background::CursorRow
        } else {
            Background::Plain
        };
        let mut cells = Vec::with_capacity(width);
        let number = format!("{:>w$} ", row + 1, w = number_width);
        cells.extend(number.chars().map(|c| Cell::new(c, RowStyle::Gutter(bg))));
        let selected = selected_columns(selection, row, line.chars().count());
        for (col, ch) in line.chars().enumerate() {
            let style = if selected.as_ref().is_some_and(|r| r.contains(&col)) {
                RowStyle::Selected
            } else {
                bg.text()
            };
            cells.push(Cell::new(displayable(ch), style));
        }
        fit(&mut cells, width, bg.text());
        *slot = cells;
    }

    if height > 0 {
        let status = build_status(&StatusContext {
            file_name: model.display_name(),
            modified: model.modified,
            row: cursor.row,
            col: cursor.col,
            annotation: annotations.get(cursor.row),
            message: model.status_message(),
        });
        let mut cells: Vec<Cell> = status
            .chars()
            .map(|c| Cell::new(displayable(c), RowStyle::Status))
            .collect();
        fit(&mut cells, width, RowStyle::Status);
        rows[height - 1] = cells;
    }

    let on_screen = cursor.row >= scroll && cursor.row < scroll + text_rows;
    let cursor_cell = (on_screen && width > 0).then(|| {
        let x = (gutter + cursor.col).min(width - 1);
        (to_u16(x), to_u16(cursor.row - scroll))
    });

    tracing::trace!(
        target: "render",
        scroll,
        text_rows,
        width,
        height,
        cursor_visible = cursor_cell.is_some(),
        "frame"
    );
    Frame {
        width,
        rows,
        cursor: cursor_cell,
    }
}

/// Build, emit and flush one frame to `out`.
pub fn render_to<W: Write>(
    out: &mut W,
    model: &BufferModel,
    annotations: &Annotations,
    ctx: TerminalContext,
) -> Result<()> {
    build_frame(model, annotations, ctx).emit().flush_to(out)
}

/// Columns of `row` covered by the selection, as a half-open range.
fn selected_columns(
    selection: Option<(core_text::Position, core_text::Position)>,
    row: usize,
    line_len: usize,
) -> Option<std::ops::Range<usize>> {
    let (start, end) = selection?;
    if row < start.row || row > end.row {
        return None;
    }
    let from = if row == start.row { start.col } else { 0 };
    let to = if row == end.row { end.col } else { line_len };
    (from < to).then_some(from..to)
}

/// Pad with spaces or truncate so the row is exactly `width` cells.
fn fit(cells: &mut Vec<Cell>, width: usize, pad: RowStyle) {
    cells.truncate(width);
    cells.resize(width, Cell::new(' ', pad));
}

/// Control characters would move the terminal cursor; show them as `?`.
fn displayable(ch: char) -> char {
    if ch.is_control() { '?' } else { ch }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
