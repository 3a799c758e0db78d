//! Editor session: the render, read, apply loop and the side effects `apply`
//! asks for (saving, relinting).
//!
//! The loop is generic over its input and output so it can be driven from a
//! byte slice in tests; `main` plugs in the terminal.

use anyhow::Result;
use core_config::Config;
use core_events::KeyEvent;
use core_input::{DecodeError, KeyDecoder};
use core_lint::Annotations;
use core_state::{BufferModel, DispatchResult, EditPolicy};
use core_terminal::TerminalContext;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub mod logging;

pub struct Session {
    model: BufferModel,
    annotations: Annotations,
    config: Config,
    path: PathBuf,
    ctx: TerminalContext,
}

impl Session {
    pub fn new(buffer: core_text::Buffer, path: PathBuf, mut config: Config, ctx: TerminalContext) -> Self {
        config.apply_viewport_height(ctx.height);
        let model = BufferModel::new(buffer, usize::from(ctx.height))
            .with_file_name(&path)
            .with_policy(policy_from(&config));
        Self {
            model,
            annotations: Annotations::new(),
            config,
            path,
            ctx,
        }
    }

    pub fn model(&self) -> &BufferModel {
        &self.model
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn context(&self) -> TerminalContext {
        self.ctx
    }

    /// Take a new terminal size; re-clamps the scroll margin.
    pub fn resize(&mut self, ctx: TerminalContext) {
        self.ctx = ctx;
        self.model.set_viewport_height(usize::from(ctx.height));
        if let Some(margin) = self.config.recompute_after_resize(ctx.height) {
            debug!(target: "runtime", margin, "scroll_margin_recomputed");
        }
        self.model.set_policy(policy_from(&self.config));
    }

    /// Apply one key and carry out a requested save.
    pub fn handle_key(&mut self, key: KeyEvent) -> DispatchResult {
        let result = self.model.apply(key);
        if result.save_requested {
            self.save();
        }
        result
    }

    /// Write the buffer to its file. Failure leaves the buffer and the
    /// modified flag untouched and is reported on the status line.
    pub fn save(&mut self) {
        match core_text::save(self.model.buffer(), &self.path) {
            Ok(size_bytes) => {
                let lines = self.model.buffer().line_count();
                self.model.mark_saved();
                self.model.set_status_message(format!("Saved {lines} lines"));
                info!(target: "io", file = %self.path.display(), size_bytes, lines, "save_ok");
                if self.config.lint_on_save() {
                    self.relint();
                }
            }
            Err(error) => {
                warn!(target: "io", file = %self.path.display(), %error, "save_failed");
                self.model.set_status_message(format!("Save failed: {error}"));
            }
        }
    }

    /// Replace the annotations with a fresh linter run on the saved file.
    pub fn relint(&mut self) {
        self.annotations = core_lint::lint(self.config.lint_command(), &self.path);
    }

    /// Run until the input ends. With `track_size` the terminal is asked for
    /// its size before every key. A frame is drawn first, then only after
    /// keys that changed the screen or a resize.
    pub fn run<R: Read, W: Write>(
        &mut self,
        decoder: &mut KeyDecoder<R>,
        out: &mut W,
        track_size: bool,
    ) -> Result<()> {
        let mut dirty = true;
        loop {
            if track_size {
                let mut ctx = self.ctx;
                if ctx.refresh() {
                    self.resize(ctx);
                    dirty = true;
                }
            }
            if dirty {
                core_render::render_to(out, &self.model, &self.annotations, self.ctx)?;
            }
            match decoder.decode() {
                Ok(key) => {
                    dirty = self.handle_key(key).dirty;
                }
                Err(DecodeError::Eof) => {
                    info!(target: "runtime", "input_closed");
                    return Ok(());
                }
                Err(DecodeError::Io(error)) => return Err(error.into()),
            }
        }
    }
}

fn policy_from(config: &Config) -> EditPolicy {
    EditPolicy {
        scroll_margin: usize::from(config.effective_margin),
        tab_width: config.tab_width(),
    }
}
