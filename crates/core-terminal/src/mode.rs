//! termios input mode.
//!
//! Non-canonical, no echo, output flow control (`IXON`) off so Ctrl-S and
//! Ctrl-Q reach the editor, one byte per read with no timeout. `ISIG` is left
//! alone: Ctrl-C still raises SIGINT, which is how the editor is closed.

use crate::{TerminalError, TerminalOps};
use crossterm::{cursor, execute, terminal};
use std::io;
use std::os::fd::RawFd;

pub struct TermiosOps {
    fd: RawFd,
    original: libc::termios,
}

impl TermiosOps {
    /// Snapshot the current attributes of `fd`; nothing is changed yet.
    pub fn capture(fd: RawFd) -> Result<Self, TerminalError> {
        // SAFETY: isatty only inspects the descriptor.
        if unsafe { libc::isatty(fd) } != 1 {
            return Err(TerminalError::NotATerminal);
        }
        let original = get_attributes(fd).map_err(TerminalError::GetAttributes)?;
        Ok(Self { fd, original })
    }
}

/// Attributes for editor mode derived from `base`.
pub fn editor_mode(base: &libc::termios) -> libc::termios {
    let mut mode = *base;
    mode.c_lflag &= !(libc::ICANON | libc::ECHO);
    mode.c_iflag &= !libc::IXON;
    mode.c_cc[libc::VMIN] = 1;
    mode.c_cc[libc::VTIME] = 0;
    mode
}

fn get_attributes(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain old data; tcgetattr fills it completely on success.
    let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut attrs) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(attrs)
}

fn set_attributes(fd: RawFd, attrs: &libc::termios) -> io::Result<()> {
    // SAFETY: attrs points to a valid termios for the duration of the call.
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, attrs) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

impl TerminalOps for TermiosOps {
    fn setup(&self) -> Result<(), TerminalError> {
        set_attributes(self.fd, &editor_mode(&self.original)).map_err(TerminalError::SetAttributes)?;
        tracing::info!(target: "runtime", fd = self.fd, "terminal_mode_entered");
        Ok(())
    }

    fn restore(&self) -> Result<(), TerminalError> {
        // Attributes first: a failed screen clear must not leave the tty raw.
        let attrs = set_attributes(self.fd, &self.original).map_err(TerminalError::SetAttributes);
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            terminal::Clear(terminal::ClearType::Purge),
            cursor::MoveTo(0, 0),
            cursor::Show
        );
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_mode_clears_expected_flags_only() {
        // SAFETY: zeroed termios is a valid value for flag arithmetic.
        let mut base: libc::termios = unsafe { std::mem::zeroed() };
        base.c_lflag = libc::ICANON | libc::ECHO | libc::ISIG | libc::IEXTEN;
        base.c_iflag = libc::IXON | libc::ICRNL;
        base.c_cc[libc::VMIN] = 0;
        base.c_cc[libc::VTIME] = 5;

        let mode = editor_mode(&base);
        assert_eq!(mode.c_lflag & (libc::ICANON | libc::ECHO), 0);
        assert_ne!(mode.c_lflag & libc::ISIG, 0);
        assert_ne!(mode.c_lflag & libc::IEXTEN, 0);
        assert_eq!(mode.c_iflag & libc::IXON, 0);
        assert_ne!(mode.c_iflag & libc::ICRNL, 0);
        assert_eq!(mode.c_cc[libc::VMIN], 1);
        assert_eq!(mode.c_cc[libc::VTIME], 0);
    }

    #[test]
    fn capture_rejects_non_terminal() {
        let file = std::fs::File::open("/dev/null").unwrap();
        use std::os::fd::AsRawFd;
        let err = TermiosOps::capture(file.as_raw_fd()).err().unwrap();
        assert!(matches!(err, TerminalError::NotATerminal));
    }
}
