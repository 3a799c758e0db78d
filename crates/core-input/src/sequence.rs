//! Fixed lookup tables: single bytes and modified arrow finals.

use core_events::KeyEvent;

const DEL: u8 = 0x7f;
/// Ctrl-S. Output flow control is disabled so the byte reaches the editor.
const SAVE: u8 = 0x13;

/// Resolve a byte that is not the start of an escape sequence.
pub fn decode_single(byte: u8) -> KeyEvent {
    match byte {
        DEL => KeyEvent::Backspace,
        b'\t' => KeyEvent::Tab,
        b'\n' => KeyEvent::Newline,
        SAVE => KeyEvent::Save,
        0x01..=0x1a => KeyEvent::Ctrl(char::from(b'A' + byte - 1)),
        0x20..=0x7e => KeyEvent::Char(char::from(byte)),
        _ => KeyEvent::Unknown,
    }
}

/// `ESC [ 1 ; <modifier> <last>`: modifier 2 = shift, 3 = alt, 5 = ctrl.
pub(crate) fn modified_arrow(modifier: u8, last: u8) -> KeyEvent {
    use KeyEvent::*;
    match (modifier, last) {
        (b'2', b'A') => ShiftUp,
        (b'2', b'B') => ShiftDown,
        (b'2', b'C') => ShiftRight,
        (b'2', b'D') => ShiftLeft,
        (b'3', b'A') => AltUp,
        (b'3', b'B') => AltDown,
        (b'3', b'C') => AltRight,
        (b'3', b'D') => AltLeft,
        (b'5', b'A') => CtrlUp,
        (b'5', b'B') => CtrlDown,
        (b'5', b'C') => CtrlRight,
        (b'5', b'D') => CtrlLeft,
        _ => Unknown,
    }
}
