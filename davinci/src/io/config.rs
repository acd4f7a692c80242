//! Bot configuration stored in `~/.davincibot.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::render::MIN_BAR_WIDTH;
use crate::core::tree::{DEFAULT_ROOT_DESCRIPTION, DEFAULT_ROOT_NAME};
use crate::io::files::{LocalFiles, TextFiles};

/// Bot configuration (TOML).
///
/// Meant to be edited by hand. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Where ideas are saved. Defaults to `~/.davincibot.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_file: Option<PathBuf>,

    /// Load the save file when a chat starts.
    pub load_on_start: bool,

    /// Write the save file when a chat ends.
    pub save_on_exit: bool,

    /// Name given to the root idea of a brand-new tree.
    pub root_name: String,

    /// Description given to the root idea of a brand-new tree.
    pub root_description: String,

    /// Number of cells inside a progress bar.
    pub progress_bar_width: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            save_file: None,
            load_on_start: true,
            save_on_exit: true,
            root_name: DEFAULT_ROOT_NAME.to_string(),
            root_description: DEFAULT_ROOT_DESCRIPTION.to_string(),
            progress_bar_width: 30,
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.progress_bar_width < MIN_BAR_WIDTH {
            return Err(anyhow!(
                "progress_bar_width must be >= {MIN_BAR_WIDTH} (got {})",
                self.progress_bar_width
            ));
        }
        if self.root_name.trim().is_empty() {
            return Err(anyhow!("root_name must not be empty"));
        }
        if let Some(path) = &self.save_file {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("save_file must not be empty when set"));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BotConfig::default()`.
pub fn load_config(path: &Path) -> Result<BotConfig> {
    if !LocalFiles.exists(path) {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(BotConfig::default());
    }
    let contents = LocalFiles
        .read_text(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: BotConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Validate and write config; the file is replaced in one rename.
pub fn write_config(path: &Path, cfg: &BotConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    LocalFiles
        .write_text(path, &buf)
        .with_context(|| format!("write config {}", path.display()))
}
