//! File log setup.
//!
//! Logs go to `edit.log` in the working directory; stdout is the screen. The
//! file is started fresh on every run.

use std::path::Path;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

pub const LOG_FILE: &str = "edit.log";

/// Open `dir/edit.log`, discarding the previous run's contents.
pub fn log_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    let _ = std::fs::remove_file(dir.join(LOG_FILE));
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_log_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        std::fs::write(&path, "stale\n").unwrap();
        let appender = log_appender(dir.path());
        assert!(appender.is_ok());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn uncreatable_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the log directory should be.
        let not_a_dir = dir.path().join("plain");
        std::fs::write(&not_a_dir, "").unwrap();
        assert!(log_appender(&not_a_dir).is_err());
    }
}
