//! Client-side configuration.
//!
//! Reads `~/.mjolnir/config.toml` and merges it under flags and environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mjolnir_kv::DEFAULT_LOCK_TIMEOUT;
use serde::Deserialize;

use crate::cli::Cli;

/// Client configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// Default database path.
    #[serde(default)]
    pub db: String,

    /// Default bucket name.
    #[serde(default)]
    pub bucket: String,

    /// Seconds to wait for the database file lock.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Default config file path: ~/.mjolnir/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

/// Effective settings: flag, then environment (both via clap), then config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db: Option<PathBuf>,
    pub bucket: Option<String>,
    pub timeout: Duration,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &ClientConfig) -> Self {
        let db = cli
            .db
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| non_empty(&config.db).map(PathBuf::from));
        let bucket = cli
            .bucket
            .clone()
            .filter(|b| !b.is_empty())
            .or_else(|| non_empty(&config.bucket).map(str::to_string));
        let timeout = cli
            .timeout
            .or(config.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LOCK_TIMEOUT);

        Self {
            db,
            bucket,
            timeout,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

/// Return the Mjolnir config directory (~/.mjolnir).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".mjolnir")
}
