//! Configuration loading and parsing.
//!
//! Parses `edit.toml` (or an override path given by the binary). Every key is
//! optional; absent keys take their defaults, unknown keys are ignored. A
//! missing file is the normal case and yields defaults silently. A file that
//! exists but does not parse also yields defaults, with a warning.
//!
//! The scroll margin is stored raw and clamped against the viewport height at
//! application time (`Config::apply_viewport_height`), so a resize can
//! re-clamp without re-reading the file.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "edit.toml";
pub const MAX_TAB_WIDTH: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    #[serde(default = "ScrollConfig::default_margin")]
    pub margin: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            margin: Self::default_margin(),
        }
    }
}

impl ScrollConfig {
    const fn default_margin() -> u16 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_width() -> usize {
        4
    }

    /// Tab width clamped to `1..=16`.
    pub fn effective_tab_width(&self) -> usize {
        self.tab_width.clamp(1, MAX_TAB_WIDTH)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LintConfig {
    #[serde(default = "LintConfig::default_command")]
    pub command: String,
    /// Re-run the linter after each successful save.
    #[serde(default)]
    pub on_save: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            command: Self::default_command(),
            on_save: false,
        }
    }
}

impl LintConfig {
    fn default_command() -> String {
        "mypy".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub lint: LintConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Path the configuration was read from, when a file was found.
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
    pub effective_margin: u16,
}

impl Default for Config {
    fn default() -> Self {
        let file = ConfigFile::default();
        Self {
            source: None,
            effective_margin: file.scroll.margin,
            file,
        }
    }
}

/// `./edit.toml` when present, else `<config_dir>/edit/edit.toml`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("edit").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                effective_margin: file.scroll.margin,
                file,
            })
        }
        Err(error) => {
            warn!(target: "config", path = %path.display(), %error, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp the scroll margin to half the viewport height. Returns the
    /// effective value.
    pub fn apply_viewport_height(&mut self, viewport_rows: u16) -> u16 {
        let raw = self.file.scroll.margin;
        let max = viewport_rows / 2;
        let clamped = raw.min(max);
        if clamped != raw {
            info!(target: "config", raw, clamped, max, viewport_rows, "scroll_margin_clamped");
        }
        self.effective_margin = clamped;
        clamped
    }

    /// Re-clamp after a resize. `Some(new_margin)` when the value changed.
    pub fn recompute_after_resize(&mut self, viewport_rows: u16) -> Option<u16> {
        let prev = self.effective_margin;
        let current = self.apply_viewport_height(viewport_rows);
        if current != prev { Some(current) } else { None }
    }

    pub fn tab_width(&self) -> usize {
        self.file.editor.effective_tab_width()
    }

    pub fn lint_command(&self) -> &str {
        &self.file.lint.command
    }

    pub fn lint_on_save(&self) -> bool {
        self.file.lint.on_save
    }
}
