use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;

/// What to do when the target file already exists in the download directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Pick the next free name: `video (1).mp4`, `video (2).mp4`, ...
    #[default]
    Rename,
    /// Replace the existing file.
    Overwrite,
    /// Refuse to save.
    Fail,
}

/// Global configuration loaded from `~/.config/blobdrop/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlobdropConfig {
    /// Directory saved files land in. Missing = current working directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
    /// Connect timeout in seconds. Missing = libcurl default.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds. Missing = wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User-Agent header. Missing = `blobdrop/<version>`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl BlobdropConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("blobdrop")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BlobdropConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<BlobdropConfig> {
    if !path.exists() {
        let default_cfg = BlobdropConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: BlobdropConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
