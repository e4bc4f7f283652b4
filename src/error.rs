//! Error types for Janus
//!
//! All modules use `JanusResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Janus operations
pub type JanusResult<T> = Result<T, JanusError>;

/// All errors that can occur in Janus
#[derive(Error, Debug)]
pub enum JanusError {
    // Cache storage errors
    #[error("Failed to open cache generation {name}: {reason}")]
    CacheOpen { name: String, reason: String },

    #[error("Failed to read cache entry {key}: {reason}")]
    CacheRead { key: String, reason: String },

    #[error("Failed to write cache entry {key}: {reason}")]
    CacheWrite { key: String, reason: String },

    #[error("Failed to enumerate cache generations: {0}")]
    CacheEnumerate(String),

    #[error("Failed to delete cache generation {name}: {reason}")]
    CacheDelete { name: String, reason: String },

    // Network errors
    #[error("Network request failed: {url}: {reason}")]
    Network { url: String, reason: String },

    // Runtime control errors
    #[error("Runtime control failed: {0}")]
    RuntimeControl(String),

    // Configuration errors
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JanusError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a network error for a request URL
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a cache read error for an entry key
    pub fn cache_read(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheRead {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a cache write error for an entry key
    pub fn cache_write(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CacheWrite {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the interception fallback chain may absorb this error
    ///
    /// Network failures fall back to the cache (and then the shell
    /// document); degraded cache reads fall back to the network. Anything
    /// else terminates the operation that produced it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::CacheRead { .. })
    }
}
