/// Configuration file and default locations.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

pub const APP_DIR: &str = "palettr";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_WATERMARK_PATH: &str = "images/TSG-Watermark.gif";
pub const DEFAULT_SHARE_URL: &str = "https://github.com/palettr/palettr";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    pub watermark_path: PathBuf,
    pub watermark_timeout_ms: u64,
    /// Program plus leading arguments; title, text and url are appended.
    pub share_command: Vec<String>,
    pub share_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            export_dir: default_export_dir(),
            watermark_path: PathBuf::from(DEFAULT_WATERMARK_PATH),
            watermark_timeout_ms: 5_000,
            share_command: Vec::new(),
            share_url: DEFAULT_SHARE_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads `path`, or the default config file when `path` is `None`.
    /// A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn watermark_timeout(&self) -> Duration {
        Duration::from_millis(self.watermark_timeout_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Inside the user's data directory, falling back to `./palettr.db`.
pub fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join(APP_DIR).join("palettr.db"),
        None => PathBuf::from("palettr.db"),
    }
}

pub fn default_log_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join(APP_DIR).join("palettr.log"),
        None => PathBuf::from("palettr.log"),
    }
}

/// The user's download directory, else the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
