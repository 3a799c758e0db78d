//! Terminal dimensions.

/// Used when the size query fails (not a tty, or the ioctl is unsupported).
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalContext {
    pub width: u16,
    pub height: u16,
}

impl TerminalContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Query the current size, falling back to 80x24.
    pub fn query() -> Self {
        let (width, height) = match crossterm::terminal::size() {
            Ok((0, _)) | Ok((_, 0)) => FALLBACK_SIZE,
            Ok(size) => size,
            Err(error) => {
                tracing::debug!(target: "runtime", %error, "terminal_size_fallback");
                FALLBACK_SIZE
            }
        };
        Self { width, height }
    }

    /// Re-query; returns true when the size changed.
    pub fn refresh(&mut self) -> bool {
        let now = Self::query();
        let changed = now != *self;
        if changed {
            tracing::debug!(target: "runtime", width = now.width, height = now.height, "terminal_resized");
        }
        *self = now;
        changed
    }

    /// Rows available for text; the last row holds the status line.
    pub fn text_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rows_reserve_status_line() {
        assert_eq!(TerminalContext::new(80, 24).text_rows(), 23);
        assert_eq!(TerminalContext::new(80, 0).text_rows(), 0);
    }

    #[test]
    fn query_never_returns_zero_size() {
        let ctx = TerminalContext::query();
        assert!(ctx.width > 0 && ctx.height > 0);
    }
}
