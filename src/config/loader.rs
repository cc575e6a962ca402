//! Configuration structures and loading logic.

use crate::config::modes::SanitizeMode;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Value of the `remember_token` cookie from a logged-in coub.com session.
    #[serde(default)]
    pub remember_token: String,
}

/// Export options configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Root folder that receives one sub-folder per coub.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Character allow-list for folder names.
    #[serde(default)]
    pub sanitize_mode: SanitizeMode,

    /// Timeout applied to every HTTP request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// How many listing pages may be fetched at once.
    #[serde(default = "default_concurrency")]
    pub page_concurrency: usize,

    /// How many coubs may be saved at once.
    #[serde(default = "default_concurrency")]
    pub item_concurrency: usize,

    /// Whether to show the item progress bar.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            sanitize_mode: SanitizeMode::default(),
            request_timeout_seconds: default_request_timeout(),
            page_concurrency: default_concurrency(),
            item_concurrency: default_concurrency(),
            show_progress: true,
        }
    }
}

fn default_request_timeout() -> u64 {
    60
}

fn default_concurrency() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.options.request_timeout_seconds)
    }
}
