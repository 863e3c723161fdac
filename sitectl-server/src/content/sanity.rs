//! Sanity HTTP query API client

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitectl_core::SanityConfig;
use url::Url;

use super::{ContentError, ContentStore, QueryParams};

/// Longest upstream error text carried into messages and logs
const MAX_ERROR_TEXT: usize = 500;

/// Client bound to one project/dataset, reading published content
#[derive(Debug, Clone)]
pub struct SanityClient {
    client: Client,
    endpoint: Url,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: &'a BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self, ContentError> {
        let base = match &config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let host = if config.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", config.project_id, host)
            }
        };
        let mut endpoint = Url::parse(&format!(
            "{base}/v{}/data/query/{}",
            config.api_version, config.dataset
        ))?;
        endpoint
            .query_pairs_mut()
            .append_pair("perspective", &config.perspective);

        let mut builder =
            Client::builder().user_agent(concat!("sitectl/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Query endpoint, including the read perspective
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, ContentError> {
        // POST keeps long projections out of the URL
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&QueryRequest {
                query,
                params: params.as_map(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(query_error(status.as_u16(), &body));
        }

        let data: QueryResponse = response.json().await?;
        Ok(data.result)
    }
}

/// Turn an error body into [`ContentError::Query`].
///
/// Sanity answers either `{"error": {"description": ...}}` or
/// `{"error": "...", "message": "..."}`; anything else is kept as text.
fn query_error(status: u16, body: &str) -> ContentError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let message = error
        .and_then(|e| e.get("description"))
        .and_then(Value::as_str)
        .or_else(|| parsed.as_ref()?.get("message")?.as_str())
        .or_else(|| error?.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| truncate(body));

    ContentError::Query {
        status,
        message,
        details: error.filter(|e| e.is_object()).cloned(),
    }
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_ERROR_TEXT {
        return text.to_string();
    }
    let mut end = MAX_ERROR_TEXT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Serve `router` on an ephemeral port and point a client at it
    async fn client_for(router: Router) -> SanityClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        SanityClient::new(&SanityConfig {
            api_host: Some(format!("http://{addr}")),
            ..SanityConfig::default()
        })
        .unwrap()
    }

    fn answering(status: StatusCode, body: &'static str) -> Router {
        Router::new().route(
            "/v2024-03-19/data/query/production",
            post(move || async move { (status, body).into_response() }),
        )
    }

    #[test]
    fn endpoint_for_live_api() {
        let client = SanityClient::new(&SanityConfig::default()).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://4dgj84d5.api.sanity.io/v2024-03-19/data/query/production?perspective=published"
        );
    }

    #[test]
    fn endpoint_for_cdn() {
        let config = SanityConfig {
            use_cdn: true,
            ..SanityConfig::default()
        };
        let client = SanityClient::new(&config).unwrap();
        assert_eq!(client.endpoint().host_str(), Some("4dgj84d5.apicdn.sanity.io"));
    }

    #[test]
    fn request_body_carries_params() {
        let params = QueryParams::new().with("identifier", "about");
        let body = serde_json::to_value(QueryRequest {
            query: "*[slug.current == $identifier][0]",
            params: params.as_map(),
        })
        .unwrap();
        assert_eq!(body["params"]["identifier"], "about");

        let empty = QueryParams::new();
        let body = serde_json::to_value(QueryRequest {
            query: "*",
            params: empty.as_map(),
        })
        .unwrap();
        assert!(body.get("params").is_none());
    }

    #[test]
    fn query_error_shapes() {
        let err = query_error(
            400,
            r#"{"error":{"description":"param $x referenced, but not provided","type":"queryParseError"}}"#,
        );
        match err {
            ContentError::Query {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "param $x referenced, but not provided");
                assert_eq!(details.unwrap()["type"], json!("queryParseError"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = query_error(401, r#"{"error":"Unauthorized","message":"Session not found"}"#);
        assert!(err.to_string().ends_with("Session not found"));

        let err = query_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "content store answered 502: Bad Gateway");
    }

    #[test]
    fn endpoint_for_api_host_override() {
        let config = SanityConfig {
            api_host: Some("http://127.0.0.1:9000/".into()),
            use_cdn: true,
            ..SanityConfig::default()
        };
        let client = SanityClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:9000/v2024-03-19/data/query/production?perspective=published"
        );
    }

    #[tokio::test]
    async fn fetch_posts_query_and_unwraps_result() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::default();
        let recorder = seen.clone();
        let router = Router::new().route(
            "/v2024-03-19/data/query/production",
            post(
                move |query: axum::extract::RawQuery, Json(body): Json<Value>| async move {
                    *recorder.lock().unwrap() = Some((query.0.unwrap_or_default(), body));
                    Json(json!({ "ms": 3, "query": "*", "result": { "title": "Footer", "items": null } }))
                },
            ),
        );
        let client = client_for(router).await;

        let params = QueryParams::new().with("menuTitle", "Footer");
        let result = client.fetch("*[title == $menuTitle][0]", &params).await.unwrap();
        assert_eq!(result, json!({ "title": "Footer", "items": null }));

        let (query, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(query, "perspective=published");
        assert_eq!(body["query"], "*[title == $menuTitle][0]");
        assert_eq!(body["params"]["menuTitle"], "Footer");
    }

    #[tokio::test]
    async fn fetch_without_result_is_null() {
        let client = client_for(answering(StatusCode::OK, r#"{"ms":1,"query":"*"}"#)).await;
        let result = client.fetch("*", &QueryParams::new()).await.unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn fetch_reports_query_error_body() {
        let client = client_for(answering(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"description":"expected '}' following object body","type":"queryParseError"}}"#,
        ))
        .await;

        let err = client.fetch("*[", &QueryParams::new()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.details().unwrap()["type"], "queryParseError");
        assert!(err.to_string().ends_with("expected '}' following object body"));
    }

    #[tokio::test]
    async fn fetch_keeps_text_error_body() {
        let client = client_for(answering(StatusCode::BAD_GATEWAY, "upstream timed out")).await;

        let err = client.fetch("*", &QueryParams::new()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(502));
        assert!(err.details().is_none());
        assert_eq!(err.to_string(), "content store answered 502: upstream timed out");
    }

    #[test]
    fn long_error_text_is_truncated() {
        let body = "é".repeat(400);
        let text = truncate(&body);
        assert!(text.ends_with("..."));
        assert!(text.len() <= MAX_ERROR_TEXT + 3);
    }
}
