//! Interrupt handling.
//!
//! The main loop blocks in `read(2)` with no timeout, so it cannot observe a
//! flag. A watcher thread owns the signal iterator instead: on SIGINT or
//! SIGTERM it restores the terminal, lets the caller flush what it buffers,
//! and exits the process with `128 + signo`.

use crate::{TerminalError, TerminalRestorer};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn from_raw(signo: i32) -> Option<Self> {
        match signo {
            SIGINT => Some(Self::SigInt),
            SIGTERM => Some(Self::SigTerm),
            _ => None,
        }
    }

    pub fn signo(self) -> i32 {
        match self {
            Self::SigInt => SIGINT,
            Self::SigTerm => SIGTERM,
        }
    }

    pub fn exit_code(self) -> i32 {
        128 + self.signo()
    }
}

/// Watch for SIGINT / SIGTERM. The first one restores the terminal, runs
/// `before_exit` and ends the process.
pub fn install_termination_signals<F>(
    restorer: TerminalRestorer,
    before_exit: F,
) -> Result<std::thread::JoinHandle<()>, TerminalError>
where
    F: FnOnce() + Send + 'static,
{
    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(TerminalError::Signals)?;
    let handle = std::thread::Builder::new()
        .name("signal-watcher".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().find_map(TerminationSignal::from_raw) {
                std::process::exit(shut_down(signal, &restorer, before_exit));
            }
        })
        .map_err(TerminalError::Signals)?;
    Ok(handle)
}

/// Everything the signal path does short of exiting; returns the exit code.
fn shut_down<F: FnOnce()>(signal: TerminationSignal, restorer: &TerminalRestorer, before_exit: F) -> i32 {
    tracing::info!(target: "runtime", ?signal, "termination_signal");
    if let Err(error) = restorer.restore() {
        tracing::error!(target: "runtime", %error, "terminal_restore_failed");
    }
    before_exit();
    signal.exit_code()
}
