//! Terminal mode management.
//!
//! `TerminalGuard` switches the controlling terminal into the editor's input
//! mode on construction and restores the saved attributes when dropped.
//! Other exit paths (panic hook, signal watcher) hold a cloned
//! `TerminalRestorer`; restoration runs at most once no matter which path
//! reaches it first.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

pub mod mode;
pub mod signals;
pub mod size;

pub use mode::TermiosOps;
pub use signals::{TerminationSignal, install_termination_signals};
pub use size::TerminalContext;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("standard input is not a terminal")]
    NotATerminal,
    #[error("cannot read terminal attributes: {0}")]
    GetAttributes(#[source] io::Error),
    #[error("cannot set terminal attributes: {0}")]
    SetAttributes(#[source] io::Error),
    #[error("cannot install signal handlers: {0}")]
    Signals(#[source] io::Error),
}

/// Enter / leave the editor's terminal mode.
pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> Result<(), TerminalError>;
    fn restore(&self) -> Result<(), TerminalError>;
}

#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    /// Restore once; later calls are no-ops.
    pub fn restore(&self) -> Result<(), TerminalError> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::debug!(target: "runtime", "terminal_restore");
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

/// RAII guard ensuring terminal state restoration even if the caller
/// early-returns or unwinds.
pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    /// Capture the attributes of standard input and enter editor mode.
    pub fn new() -> Result<Self, TerminalError> {
        let ops = TermiosOps::capture(libc::STDIN_FILENO)?;
        Self::with_ops(Arc::new(ops))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> Result<Self, TerminalError> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = self.restorer.restore() {
            tracing::error!(target: "runtime", %error, "terminal_restore_failed");
        }
    }
}
