//! Proxy configuration
//!
//! Three inputs are provided by the host: the version tag naming the
//! current cache generation, the seed asset list prefetched at install
//! time, and the shell document used as SPA fallback. Configs are built
//! in code or loaded from a TOML file.

use crate::error::{JanusError, JanusResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Configuration for one proxy deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Version tag naming the current cache generation. Changing it
    /// triggers the full lifecycle on the next install/activate cycle.
    pub cache_version: String,

    /// Paths prefetched and stored at install time, in order
    pub seed_assets: Vec<String>,

    /// Path served in place of unmatched HTML navigation requests
    pub shell_document: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            cache_version: "janus-cache-v1".to_string(),
            seed_assets: Vec::new(),
            shell_document: "/index.html".to_string(),
        }
    }
}

impl ProxyConfig {
    /// Build a config programmatically
    pub fn new(
        cache_version: impl Into<String>,
        seed_assets: Vec<String>,
        shell_document: impl Into<String>,
    ) -> Self {
        Self {
            cache_version: cache_version.into(),
            seed_assets,
            shell_document: shell_document.into(),
        }
    }

    /// Load configuration from a TOML file
    pub async fn load(path: &Path) -> JanusResult<Self> {
        if !path.exists() {
            return Err(JanusError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| JanusError::io(format!("reading config from {}", path.display()), e))?;

        let config: Self = toml::from_str(&content).map_err(|e| JanusError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if let Some(reason) = config.validation_error() {
            return Err(JanusError::ConfigInvalid {
                path: path.to_path_buf(),
                reason,
            });
        }

        debug!(
            "Loaded config: generation {} with {} seed assets",
            config.cache_version,
            config.seed_assets.len()
        );
        Ok(config)
    }

    fn validation_error(&self) -> Option<String> {
        if self.cache_version.trim().is_empty() {
            return Some("cache_version must not be empty".to_string());
        }
        if self.shell_document.trim().is_empty() {
            return Some("shell_document must not be empty".to_string());
        }
        if !self.shell_document.starts_with('/') {
            return Some(format!(
                "shell_document must be an absolute path, got '{}'",
                self.shell_document
            ));
        }
        None
    }
}
