//! Structured error types for sitectl-core.
//!
//! Uses `thiserror` so library consumers get composable errors.
//! The `sitectl` binary wraps these with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sitectl-core operations
#[derive(Error, Debug)]
pub enum SiteError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration file exists but is not valid TOML for `SiteConfig`
    #[error("Invalid config file {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// Configuration value rejected
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for sitectl-core operations
pub type Result<T> = std::result::Result<T, SiteError>;

impl SiteError {
    /// Create an invalid config file error
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
