//! Path conventions and first-run setup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{BotConfig, write_config};

const SAVE_FILE_NAME: &str = ".davincibot.json";
const CONFIG_FILE_NAME: &str = ".davincibot.toml";

/// Canonical file locations under a home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotPaths {
    pub home: PathBuf,
    pub save_path: PathBuf,
    pub config_path: PathBuf,
}

impl BotPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            save_path: home.join(SAVE_FILE_NAME),
            config_path: home.join(CONFIG_FILE_NAME),
            home,
        }
    }

    /// Paths under the current user's home directory.
    pub fn from_home_dir() -> Result<Self> {
        let home = dirs::home_dir().context("cannot determine home directory")?;
        Ok(Self::new(home))
    }

    /// Save file from config, falling back to the home dotfile.
    pub fn save_path_for(&self, cfg: &BotConfig) -> PathBuf {
        cfg.save_file.clone().unwrap_or_else(|| self.save_path.clone())
    }
}

/// Options for `init_config`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite an existing config file.
    pub force: bool,
}

/// Write a default config file at `path`.
///
/// Fails if the file already exists unless `options.force` is set.
pub fn init_config(path: &Path, options: &InitOptions) -> Result<BotConfig> {
    if path.exists() && !options.force {
        return Err(anyhow!(
            "davinci init: {} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    if path.is_dir() {
        return Err(anyhow!(
            "davinci init: {} is a directory",
            path.display()
        ));
    }
    let cfg = BotConfig::default();
    write_config(path, &cfg).with_context(|| format!("write {}", path.display()))?;
    Ok(cfg)
}
