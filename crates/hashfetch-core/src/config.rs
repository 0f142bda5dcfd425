use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dispatch::DEFAULT_PARALLELISM;
use crate::fetch::{ClientOptions, DEFAULT_MAX_REDIRECTIONS, DEFAULT_TIMEOUT};

/// Global configuration loaded from `~/.config/hashfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashfetchConfig {
    /// Parallel requests when `--parallel` is not given. Values <= 0 mean the default (10).
    pub parallel: i64,
    /// Total timeout in seconds for one request, connect through last body byte.
    pub request_timeout_secs: u64,
    /// Optional cap in seconds on connection establishment alone.
    pub connect_timeout_secs: Option<u64>,
    /// Maximum redirect hops followed per request.
    pub max_redirections: u32,
}

impl Default for HashfetchConfig {
    fn default() -> Self {
        Self {
            parallel: DEFAULT_PARALLELISM as i64,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: None,
            max_redirections: DEFAULT_MAX_REDIRECTIONS,
        }
    }
}

impl HashfetchConfig {
    /// Transfer options for the shared fetch client.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            max_redirections: self.max_redirections,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashfetch")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from the XDG config dir, or defaults if no file exists.
/// Nothing is written to disk.
pub fn load_or_default() -> Result<HashfetchConfig> {
    let path = config_path()?;
    match load_from_path(&path)? {
        Some(cfg) => Ok(cfg),
        None => {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(HashfetchConfig::default())
        }
    }
}

/// Load configuration from `path`. Returns `Ok(None)` if the file does not exist.
pub fn load_from_path(path: &Path) -> Result<Option<HashfetchConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HashfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(cfg))
}
