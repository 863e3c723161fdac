//! Content store access.
//!
//! The dispatcher only sees [`ContentStore`]; [`SanityClient`] is the real
//! implementation, tests substitute their own.

mod sanity;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use sanity::SanityClient;

/// Named `$params` for a GROQ query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(BTreeMap<String, Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.0
    }
}

/// Upstream failure, passed through to callers unchanged
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("request to content store failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content store answered {status}: {message}")]
    Query {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    #[error("invalid content store URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ContentError {
    /// HTTP status reported by the upstream, when there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Query { status, .. } => Some(*status),
            Self::Url(_) => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Query { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

/// Read-only access to the content store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run `query` with `params`. JSON `null` when nothing matched.
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, ContentError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_builder() {
        let params = QueryParams::new().with("menuTitle", "Footer").with("limit", 3);
        assert_eq!(params.get("menuTitle"), Some(&json!("Footer")));
        assert_eq!(params.iter().count(), 2);
    }

    #[test]
    fn query_error_exposes_status_and_details() {
        let err = ContentError::Query {
            status: 400,
            message: "expected '}'".into(),
            details: Some(json!({ "type": "queryParseError" })),
        };
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.details().unwrap()["type"], "queryParseError");
        assert_eq!(err.to_string(), "content store answered 400: expected '}'");
    }
}
