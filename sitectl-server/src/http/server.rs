//! Axum server setup
//!
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use sitectl_core::{PublicConfig, SiteConfig};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::content::{ContentError, SanityClient};
use crate::dispatch::Dispatcher;

/// Shared application state
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// Handed to the presentation layer as-is
    pub public: PublicConfig,
    pub content_source: Option<String>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, public: PublicConfig) -> Self {
        Self {
            dispatcher,
            public,
            content_source: None,
        }
    }

    /// Name the upstream in `/health`
    pub fn with_content_source(mut self, source: impl Into<String>) -> Self {
        self.content_source = Some(source.into());
        self
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

/// Build the application router around `state`
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::sanity::router())
        .merge(routes::config::router())
        .layer(cors_layer(cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run_server(config: SiteConfig) -> Result<(), ServerError> {
    let client = SanityClient::new(&config.sanity)?;
    tracing::info!(
        endpoint = %client.endpoint(),
        use_cdn = config.sanity.use_cdn,
        "content store configured"
    );

    let source = format!("{}/{}", config.sanity.project_id, config.sanity.dataset);
    let state = AppState::new(Dispatcher::new(Arc::new(client)), config.public)
        .with_content_source(source);
    let app = build_router(state, config.server.cors_permissive);

    let listener = TcpListener::bind(config.server.bind).await?;
    tracing::info!("Server listening on {}", config.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("content store setup failed: {0}")]
    Content(#[from] ContentError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::StubStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(store: Arc<StubStore>) -> Router {
        let public = PublicConfig {
            google_maps_api_key: "maps-key".into(),
        };
        build_router(AppState::new(Dispatcher::new(store), public), false)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_check() {
        let store = StubStore::returning(Value::Null);
        let (status, body) = get(app(store.clone()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body.get("contentSource").is_none());
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_names_content_source() {
        let state = AppState::new(
            Dispatcher::new(StubStore::returning(Value::Null)),
            PublicConfig::default(),
        )
        .with_content_source("4dgj84d5/production");
        let (_, body) = get(build_router(state, false), "/health").await;
        assert_eq!(body["contentSource"], "4dgj84d5/production");
    }

    #[tokio::test]
    async fn menu_by_title() {
        let store = StubStore::returning(json!({
            "title": "Footer",
            "items": [{ "text": "Visit", "to": { "section": { "title": "Find Us" } } }]
        }));
        let (status, body) = get(app(store), "/api/sanity?menuTitle=Footer").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["to"]["anchor"], "find-us");
    }

    #[tokio::test]
    async fn missing_page_is_404() {
        let (status, body) = get(
            app(StubStore::returning(Value::Null)),
            "/api/sanity?type=page&identifier=does-not-exist&identifierType=slug",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "Page not found: does-not-exist");
    }

    #[tokio::test]
    async fn unknown_type_is_400() {
        let store = StubStore::returning(Value::Null);
        let (status, body) = get(app(store.clone()), "/api/sanity?type=recipes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_keeps_status() {
        let (status, body) = get(
            app(StubStore::failing(503, "dataset unavailable")),
            "/api/sanity?type=team",
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("dataset unavailable"));
    }

    #[tokio::test]
    async fn empty_settings_shape() {
        let (status, body) = get(
            app(StubStore::returning(Value::Null)),
            "/api/sanity?type=siteSettings",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["footerLogos"], json!([]));
        assert_eq!(body["contactInfo"], json!([]));
    }

    #[tokio::test]
    async fn concurrent_settings_requests() {
        let router = app(StubStore::returning(json!({ "title": "Spa" })));
        let (a, b) = tokio::join!(
            get(router.clone(), "/api/sanity?type=siteSettings"),
            get(router, "/api/sanity?type=siteSettings"),
        );
        assert_eq!(a, b);
        assert_eq!(a.1["title"], "Spa");
    }

    #[tokio::test]
    async fn public_config_is_exposed() {
        let (status, body) = get(app(StubStore::returning(Value::Null)), "/api/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["googleMapsApiKey"], "maps-key");
    }
}
