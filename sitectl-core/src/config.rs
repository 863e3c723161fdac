//! Process-wide configuration.
//!
//! Built once at startup and handed to the server and client by value.
//! Nothing in a request can change it.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};

/// Sanity project the site is authored in.
pub const DEFAULT_PROJECT_ID: &str = "4dgj84d5";
pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-03-19";

/// Centralized configuration for sitectl
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub sanity: SanityConfig,
    pub server: ServerSection,
    pub public: PublicConfig,
}

/// Upstream content store identity and read mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Read through the API CDN instead of the live API
    pub use_cdn: bool,
    pub perspective: String,
    /// Upstream request timeout. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
    /// Query API base URL, e.g. a local mirror. Unset means
    /// `https://<project_id>.api.sanity.io` (or `apicdn` with `use_cdn`).
    pub api_host: Option<String>,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: false,
            perspective: "published".to_string(),
            request_timeout_secs: None,
            api_host: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    /// Allow any origin. Default is localhost origins only.
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
        }
    }
}

/// Values handed through to the presentation layer untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicConfig {
    pub google_maps_api_key: String,
}

impl SiteConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `~/.sitectl/config.toml`
    /// is read when present and built-in defaults are used otherwise.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SiteError::invalid_config(path, e.to_string()))
    }

    /// Get config file path: ~/.sitectl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sitectl/config.toml")
    }

    /// Apply `GOOGLE_MAPS_API_KEY` and `SITECTL_BIND` overrides
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GOOGLE_MAPS_API_KEY") {
            self.public.google_maps_api_key = key;
        }
        if let Some(bind) = lookup("SITECTL_BIND") {
            self.server.bind = bind
                .parse()
                .map_err(|_| SiteError::config(format!("SITECTL_BIND is not an address: {bind}")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let sanity = &self.sanity;
        if sanity.project_id.is_empty()
            || !sanity.project_id.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(SiteError::config(format!(
                "sanity.project_id must be alphanumeric, got '{}'",
                sanity.project_id
            )));
        }
        if sanity.dataset.is_empty() {
            return Err(SiteError::config("sanity.dataset cannot be empty"));
        }
        if sanity.api_version.is_empty() {
            return Err(SiteError::config("sanity.api_version cannot be empty"));
        }
        if sanity.request_timeout_secs == Some(0) {
            return Err(SiteError::config("sanity.request_timeout_secs must be positive"));
        }
        if let Some(host) = &sanity.api_host {
            if !(host.starts_with("http://") || host.starts_with("https://")) {
                return Err(SiteError::config(format!(
                    "sanity.api_host must be an http(s) URL, got '{host}'"
                )));
            }
        }
        Ok(())
    }
}
