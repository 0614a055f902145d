use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default cap on request bodies (photo uploads), 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Startup configuration.
///
/// `host`, `port` and `cache_dir` have no defaults and must be supplied,
/// either in a TOML file or on the command line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory photo blobs are written to. Created on startup.
    pub cache_dir: PathBuf,
    /// Directory holding the static HTML form pages.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            cache_dir: cache_dir.into(),
            static_dir: default_static_dir(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ServerError::Config("port must be non-zero".into()));
        }
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ServerError::Config("cache_dir must not be empty".into()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ServerError::Config("max_upload_bytes must be non-zero".into()));
        }
        Ok(())
    }
}
