//! Symbolic key events shared by the decoder, the buffer model and the runtime.
//!
//! `KeyEvent` is a closed set: every byte sequence the decoder can observe maps
//! onto exactly one variant, with `Unknown` as the explicit catch-all. Consumers
//! match exhaustively so a new variant cannot silently fall through.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Printable ASCII (0x20..=0x7E).
    Char(char),
    /// Line feed (0x0A).
    Newline,
    Tab,
    ShiftTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    ShiftUp,
    ShiftDown,
    ShiftLeft,
    ShiftRight,
    AltUp,
    AltDown,
    AltLeft,
    AltRight,
    CtrlUp,
    CtrlDown,
    CtrlLeft,
    CtrlRight,
    /// Single control byte 0x01..=0x1A without a dedicated meaning; carries the
    /// upper-case letter (`0x01` -> `'A'`).
    Ctrl(char),
    /// Ctrl-S.
    Save,
    AltTab,
    /// ESC followed by a printable byte.
    Alt(char),
    Unknown,
}

impl KeyEvent {
    /// Arrow variants that extend the selection.
    pub fn is_selection_extend(self) -> bool {
        matches!(
            self,
            KeyEvent::ShiftUp | KeyEvent::ShiftDown | KeyEvent::ShiftLeft | KeyEvent::ShiftRight
        )
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Char(c) => write!(f, "{c:?}"),
            KeyEvent::Ctrl(c) => write!(f, "<C-{c}>"),
            KeyEvent::Alt(c) => write!(f, "<A-{c}>"),
            other => write!(f, "<{other:?}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(KeyEvent::Char('x').to_string(), "'x'");
        assert_eq!(KeyEvent::Ctrl('Q').to_string(), "<C-Q>");
        assert_eq!(KeyEvent::Alt('f').to_string(), "<A-f>");
        assert_eq!(KeyEvent::CtrlRight.to_string(), "<CtrlRight>");
    }

    #[test]
    fn only_shift_arrows_extend_selection() {
        assert!(KeyEvent::ShiftLeft.is_selection_extend());
        assert!(KeyEvent::ShiftDown.is_selection_extend());
        assert!(!KeyEvent::ShiftTab.is_selection_extend());
        assert!(!KeyEvent::Left.is_selection_extend());
    }
}
