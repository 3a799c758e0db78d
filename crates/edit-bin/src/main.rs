//! `edit` entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::load_from;
use core_input::KeyDecoder;
use core_terminal::{TerminalContext, TerminalGuard, TerminalRestorer, install_termination_signals};
use edit::Session;
use edit::logging::log_appender;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// Shared so the signal watcher can flush the log before exiting.
type LogGuard = Arc<Mutex<Option<WorkerGuard>>>;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "edit", version, about = "Minimal terminal text editor")]
struct Args {
    /// File to edit. Must exist and be valid UTF-8.
    path: PathBuf,
    /// Configuration file (overrides discovery of `edit.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

struct AppStartup {
    log_guard: LogGuard,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            log_guard: Arc::new(Mutex::new(None)),
        }
    }

    /// Without a writable `edit.log` the editor runs unlogged.
    fn configure_logging(&mut self) {
        let Ok(file_appender) = log_appender(Path::new(".")) else {
            return;
        };
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        let installed = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok();
        if !installed {
            return;
        }
        if let Ok(mut slot) = self.log_guard.lock() {
            *slot = Some(guard);
        }
    }

    /// Restores the terminal before the default hook prints the panic.
    fn install_panic_hook(restorer: TerminalRestorer) {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                let _ = restorer.restore();
                default_panic(info);
            }));
        });
    }
}

/// Log the final event and drop the writer guard, flushing `edit.log`.
fn shutdown_log(log_guard: &LogGuard) {
    info!(target: "runtime", "shutdown");
    if let Ok(mut slot) = log_guard.lock() {
        slot.take();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging();
    info!(target: "runtime", "startup");

    let buffer = core_text::load(&args.path)
        .with_context(|| format!("cannot open {}", args.path.display()))?;
    let config = load_from(args.config.clone())?;
    let ctx = TerminalContext::query();
    info!(
        target: "runtime",
        file = %args.path.display(),
        lines = buffer.line_count(),
        config = ?config.source,
        width = ctx.width,
        height = ctx.height,
        "bootstrap_complete"
    );
    let mut session = Session::new(buffer, args.path, config, ctx);

    let guard = TerminalGuard::new().context("cannot configure the terminal")?;
    AppStartup::install_panic_hook(guard.restorer());
    let signal_log = Arc::clone(&startup.log_guard);
    let _signal_watcher =
        install_termination_signals(guard.restorer(), move || shutdown_log(&signal_log))?;

    let mut decoder = KeyDecoder::new(std::io::stdin().lock());
    // Unlocked handle: the signal watcher writes to stdout while restoring.
    let mut stdout = std::io::stdout();
    let result = session.run(&mut decoder, &mut stdout, true);
    drop(guard);
    info!(target: "runtime", ok = result.is_ok(), "loop_exit");
    shutdown_log(&startup.log_guard);
    result
}
