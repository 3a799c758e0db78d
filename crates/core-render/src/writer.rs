//! Terminal command batching.
//!
//! A frame is first described as an ordered list of `Command`s and only then
//! translated into crossterm output and flushed once. Keeping the list
//! inspectable lets tests compare frames without a terminal.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Positions are absolute with a (0,0) origin; the composer keeps them in
//!   bounds.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Clear the visible screen and the scrollback.
    ClearAll,
    MoveTo(u16, u16),
    Colors { fg: Color, bg: Color },
    ResetColor,
    Print(String),
    HideCursor,
    ShowCursor,
}

#[derive(Default, Debug)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn clear_all(&mut self) {
        self.cmds.push(Command::ClearAll);
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn colors(&mut self, fg: Color, bg: Color) {
        self.cmds.push(Command::Colors { fg, bg });
    }
    pub fn reset_color(&mut self) {
        self.cmds.push(Command::ResetColor);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::ClearAll => {
                    queue!(out, Clear(ClearType::All), Clear(ClearType::Purge))?;
                }
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::Colors { fg, bg } => {
                    queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                }
                Command::ResetColor => {
                    queue!(out, ResetColor)?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
                Command::HideCursor => {
                    queue!(out, Hide)?;
                }
                Command::ShowCursor => {
                    queue!(out, Show)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
