//! Error annotations produced by an external linter.
//!
//! The linter is run synchronously with the file path as its only argument.
//! Output lines of the form `<file>:<line>:<severity>:<message>` become
//! 0-based line annotations. Anything else (summary lines, notes without a
//! line number, blank lines) is skipped. A tool that cannot be started yields
//! an empty index; a nonzero exit status is normal for linters that found
//! problems and is not treated as failure.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

/// 0-based line number to the message shown for that line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    by_line: BTreeMap<usize, String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.by_line.get(&row).map(String::as_str)
    }

    pub fn contains(&self, row: usize) -> bool {
        self.by_line.contains_key(&row)
    }

    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Record `message` for `row` unless the row already has one.
    pub fn insert_first(&mut self, row: usize, message: impl Into<String>) {
        self.by_line.entry(row).or_insert_with(|| message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.by_line.iter().map(|(row, msg)| (*row, msg.as_str()))
    }
}

impl FromIterator<(usize, String)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        let mut out = Annotations::new();
        for (row, msg) in iter {
            out.insert_first(row, msg);
        }
        out
    }
}

/// Run `command <path>` and collect its diagnostics.
pub fn lint(command: &str, path: &Path) -> Annotations {
    let output = match Command::new(command).arg(path).output() {
        Ok(output) => output,
        Err(error) => {
            tracing::warn!(target: "lint", command, file = %path.display(), %error, "linter_spawn_failed");
            return Annotations::new();
        }
    };
    let stdout = String::from_utf8_lossy(&output.stdout);
    let annotations = parse_output(&stdout);
    tracing::info!(
        target: "lint",
        command,
        file = %path.display(),
        status = ?output.status.code(),
        count = annotations.len(),
        "lint_complete"
    );
    annotations
}

/// Parse linter output. Message text keeps any further `:` characters.
pub fn parse_output(text: &str) -> Annotations {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(usize, String)> {
    let mut fields = line.splitn(4, ':');
    let _file = fields.next()?;
    let number: usize = fields.next()?.trim().parse().ok()?;
    let _severity = fields.next()?;
    let message = fields.next()?.trim();
    let row = number.checked_sub(1)?;
    Some((row, message.to_string()))
}
