//! Client-side failures.
//!
//! Errors are stored in hook error slots and shared between deduplicated
//! waiters, so every variant is cheap to clone.

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The endpoint answered with an error body
    #[error("endpoint answered {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(Arc<reqwest::Error>),

    #[error("unexpected response body: {0}")]
    Decode(Arc<serde_json::Error>),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(Arc::new(e))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(Arc::new(e))
    }
}
