//! File load / save boundary.
//!
//! Load splits on `\n`, save joins with `\n` and overwrites. Because the rope
//! keeps the trailing empty line of a newline-terminated file, a load followed
//! by a save writes back the same bytes.

use crate::Buffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn load(path: &Path) -> Result<Buffer, TextError> {
    let bytes = std::fs::read(path).map_err(|source| TextError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| TextError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    let buffer = Buffer::from_text(&content);
    tracing::debug!(
        target: "io",
        file = %path.display(),
        size_bytes = content.len(),
        line_count = buffer.line_count(),
        "file_read_ok"
    );
    Ok(buffer)
}

/// Overwrite `path` with the buffer contents. Returns the number of bytes
/// written. The in-memory buffer is never touched, also on failure.
pub fn save(buffer: &Buffer, path: &Path) -> Result<usize, TextError> {
    let write_err = |source| TextError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    buffer.rope().write_to(&mut out).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    let size_bytes = buffer.len_bytes();
    tracing::debug!(target: "io", file = %path.display(), size_bytes, "file_write_ok");
    Ok(size_bytes)
}
