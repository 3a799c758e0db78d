//! Byte-level key decoder.
//!
//! Turns the raw byte stream of a terminal in non-canonical mode into
//! `KeyEvent`s. Escape sequences share prefixes (`ESC [ C` is Right while
//! `ESC [ 1 ; 5 C` is Ctrl-Right) so decoding branches progressively and reads
//! exactly the bytes a sequence needs:
//!
//! * Over-reading would block forever waiting for a byte the terminal never
//!   sends.
//! * Under-reading leaves sequence tails in the stream where the next call would
//!   misread them as literal keystrokes.
//!
//! There is no timeout: every read blocks until a byte arrives. A bare ESC
//! press therefore waits for the following key.

mod sequence;

use core_events::KeyEvent;
use std::io::{self, Read};
use thiserror::Error;
use tracing::trace;

pub use sequence::decode_single;

pub const ESC: u8 = 0x1b;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input stream ended before the first byte of a key.
    #[error("input stream closed")]
    Eof,
    #[error("failed to read terminal input: {0}")]
    Io(#[from] io::Error),
}

/// Blocking decoder over any byte source (stdin in the editor, slices in tests).
pub struct KeyDecoder<R> {
    input: R,
}

impl<R: Read> KeyDecoder<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    pub fn get_ref(&self) -> &R {
        &self.input
    }

    /// Read and decode exactly one key.
    ///
    /// End of input inside an escape sequence yields `KeyEvent::Unknown`; only
    /// a closed stream before the first byte is reported as `DecodeError::Eof`.
    pub fn decode(&mut self) -> Result<KeyEvent, DecodeError> {
        let Some(first) = self.next_byte()? else {
            return Err(DecodeError::Eof);
        };
        let event = if first == ESC {
            self.decode_escape()?
        } else {
            decode_single(first)
        };
        trace!(target: "input.decode", byte = first, %event, "key");
        Ok(event)
    }

    fn decode_escape(&mut self) -> Result<KeyEvent, DecodeError> {
        let Some(b1) = self.next_byte()? else {
            return Ok(KeyEvent::Unknown);
        };
        match b1 {
            b'\t' => Ok(KeyEvent::AltTab),
            b'[' => self.decode_csi(),
            0x20..=0x7e => Ok(KeyEvent::Alt(char::from(b1))),
            _ => Ok(KeyEvent::Unknown),
        }
    }

    fn decode_csi(&mut self) -> Result<KeyEvent, DecodeError> {
        let Some(b2) = self.next_byte()? else {
            return Ok(KeyEvent::Unknown);
        };
        let event = match b2 {
            b'A' => KeyEvent::Up,
            b'B' => KeyEvent::Down,
            b'C' => KeyEvent::Right,
            b'D' => KeyEvent::Left,
            b'H' => KeyEvent::Home,
            b'F' => KeyEvent::End,
            b'Z' => KeyEvent::ShiftTab,
            b'1' => self.decode_modified_arrow()?,
            b'5' => self.decode_tilde(KeyEvent::PageUp)?,
            b'6' => self.decode_tilde(KeyEvent::PageDown)?,
            _ => KeyEvent::Unknown,
        };
        Ok(event)
    }

    /// `ESC [ 1` has been consumed; expects `; <modifier> <final>`.
    fn decode_modified_arrow(&mut self) -> Result<KeyEvent, DecodeError> {
        match self.next_byte()? {
            Some(b';') => {}
            _ => return Ok(KeyEvent::Unknown),
        }
        let Some(modifier) = self.next_byte()? else {
            return Ok(KeyEvent::Unknown);
        };
        let Some(last) = self.next_byte()? else {
            return Ok(KeyEvent::Unknown);
        };
        Ok(sequence::modified_arrow(modifier, last))
    }

    fn decode_tilde(&mut self, event: KeyEvent) -> Result<KeyEvent, DecodeError> {
        match self.next_byte()? {
            Some(b'~') => Ok(event),
            _ => Ok(KeyEvent::Unknown),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
    }
}

impl<R: Read> Iterator for KeyDecoder<R> {
    type Item = Result<KeyEvent, DecodeError>;

    /// Yields keys until the stream closes; a closed stream ends iteration.
    fn next(&mut self) -> Option<Self::Item> {
        match self.decode() {
            Err(DecodeError::Eof) => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decoder(bytes: &[u8]) -> KeyDecoder<Cursor<Vec<u8>>> {
        KeyDecoder::new(Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn ctrl_right_consumes_exactly_six_bytes() {
        let mut d = decoder(b"\x1b[1;5Cx");
        assert_eq!(d.decode().unwrap(), KeyEvent::CtrlRight);
        assert_eq!(d.get_ref().position(), 6);
        assert_eq!(d.decode().unwrap(), KeyEvent::Char('x'));
    }

    #[test]
    fn plain_arrows_consume_three_bytes() {
        let mut d = decoder(b"\x1b[A\x1b[B\x1b[C\x1b[D");
        assert_eq!(d.decode().unwrap(), KeyEvent::Up);
        assert_eq!(d.get_ref().position(), 3);
        assert_eq!(d.decode().unwrap(), KeyEvent::Down);
        assert_eq!(d.decode().unwrap(), KeyEvent::Right);
        assert_eq!(d.decode().unwrap(), KeyEvent::Left);
        assert!(matches!(d.decode(), Err(DecodeError::Eof)));
    }

    #[test]
    fn home_end_shift_tab() {
        let mut d = decoder(b"\x1b[H\x1b[F\x1b[Z");
        assert_eq!(d.decode().unwrap(), KeyEvent::Home);
        assert_eq!(d.decode().unwrap(), KeyEvent::End);
        assert_eq!(d.decode().unwrap(), KeyEvent::ShiftTab);
    }

    #[test]
    fn paging_keys_consume_tilde() {
        let mut d = decoder(b"\x1b[5~\x1b[6~a");
        assert_eq!(d.decode().unwrap(), KeyEvent::PageUp);
        assert_eq!(d.get_ref().position(), 4);
        assert_eq!(d.decode().unwrap(), KeyEvent::PageDown);
        assert_eq!(d.decode().unwrap(), KeyEvent::Char('a'));
    }

    #[test]
    fn page_prefix_without_tilde_is_unknown() {
        let mut d = decoder(b"\x1b[5xq");
        assert_eq!(d.decode().unwrap(), KeyEvent::Unknown);
        assert_eq!(d.get_ref().position(), 4);
        assert_eq!(d.decode().unwrap(), KeyEvent::Char('q'));
    }

    #[test]
    fn modifier_digits_select_variant() {
        let mut d = decoder(b"\x1b[1;2D\x1b[1;3A\x1b[1;5B\x1b[1;2C");
        assert_eq!(d.decode().unwrap(), KeyEvent::ShiftLeft);
        assert_eq!(d.decode().unwrap(), KeyEvent::AltUp);
        assert_eq!(d.decode().unwrap(), KeyEvent::CtrlDown);
        assert_eq!(d.decode().unwrap(), KeyEvent::ShiftRight);
    }

    #[test]
    fn unsupported_modifier_is_unknown_and_fully_consumed() {
        let mut d = decoder(b"\x1b[1;7Cz");
        assert_eq!(d.decode().unwrap(), KeyEvent::Unknown);
        assert_eq!(d.get_ref().position(), 6);
        assert_eq!(d.decode().unwrap(), KeyEvent::Char('z'));
    }

    #[test]
    fn one_without_semicolon_stops_after_fourth_byte() {
        let mut d = decoder(b"\x1b[1~k");
        assert_eq!(d.decode().unwrap(), KeyEvent::Unknown);
        assert_eq!(d.get_ref().position(), 4);
        assert_eq!(d.decode().unwrap(), KeyEvent::Char('k'));
    }

    #[test]
    fn alt_forms() {
        let mut d = decoder(b"\x1b\t\x1bf\x1b\x01");
        assert_eq!(d.decode().unwrap(), KeyEvent::AltTab);
        assert_eq!(d.decode().unwrap(), KeyEvent::Alt('f'));
        assert_eq!(d.decode().unwrap(), KeyEvent::Unknown);
        assert_eq!(d.get_ref().position(), 6);
    }

    #[test]
    fn truncated_sequence_resolves_to_unknown() {
        let mut d = decoder(b"\x1b[1;");
        assert_eq!(d.decode().unwrap(), KeyEvent::Unknown);
        assert!(matches!(d.decode(), Err(DecodeError::Eof)));
    }

    #[test]
    fn iterator_stops_at_end_of_stream() {
        let d = decoder(b"ab\x7f");
        let keys: Vec<KeyEvent> = d.map(|k| k.unwrap()).collect();
        assert_eq!(
            keys,
            vec![KeyEvent::Char('a'), KeyEvent::Char('b'), KeyEvent::Backspace]
        );
    }

    struct FlakyReader {
        interrupted: bool,
        data: Cursor<Vec<u8>>,
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut d = KeyDecoder::new(FlakyReader {
            interrupted: false,
            data: Cursor::new(b"x".to_vec()),
        });
        assert_eq!(d.decode().unwrap(), KeyEvent::Char('x'));
    }
}
