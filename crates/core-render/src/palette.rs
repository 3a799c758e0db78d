//! Colors for each cell role.
//!
//! Row and span roles map onto terminal colors through `RowStyle::colors`;
//! `Color::Reset` leaves the terminal default in place.

use crossterm::style::Color;

pub const TEXT_FG: Color = Color::Grey;
pub const CURSOR_ROW_BG: Color = Color::Black;
pub const ANNOTATION_BG: Color = Color::DarkRed;
pub const SELECTION_FG: Color = Color::Black;
pub const SELECTION_BG: Color = Color::Grey;
pub const GUTTER_FG: Color = Color::DarkGrey;
pub const STATUS_FG: Color = Color::Black;
pub const STATUS_BG: Color = Color::Grey;

/// Styling role of a single screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStyle {
    #[default]
    Plain,
    CursorRow,
    Annotated,
    Gutter(Background),
    Selected,
    Status,
}

/// Background a gutter cell inherits from its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Plain,
    CursorRow,
    Annotated,
}

impl RowStyle {
    /// `(foreground, background)`; `Color::Reset` means terminal default.
    pub fn colors(self) -> (Color, Color) {
        match self {
            RowStyle::Plain => (TEXT_FG, Color::Reset),
            RowStyle::CursorRow => (TEXT_FG, CURSOR_ROW_BG),
            RowStyle::Annotated => (TEXT_FG, ANNOTATION_BG),
            RowStyle::Gutter(bg) => (GUTTER_FG, bg.color()),
            RowStyle::Selected => (SELECTION_FG, SELECTION_BG),
            RowStyle::Status => (STATUS_FG, STATUS_BG),
        }
    }
}

impl Background {
    pub fn color(self) -> Color {
        match self {
            Background::Plain => Color::Reset,
            Background::CursorRow => CURSOR_ROW_BG,
            Background::Annotated => ANNOTATION_BG,
        }
    }

    /// Text style for the row body.
    pub fn text(self) -> RowStyle {
        match self {
            Background::Plain => RowStyle::Plain,
            Background::CursorRow => RowStyle::CursorRow,
            Background::Annotated => RowStyle::Annotated,
        }
    }
}
