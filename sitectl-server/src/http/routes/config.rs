//! Public runtime configuration for the presentation layer

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    pub google_maps_api_key: String,
}

/// GET /api/config
async fn public_config(State(state): State<Arc<AppState>>) -> Json<PublicConfigResponse> {
    Json(PublicConfigResponse {
        google_maps_api_key: state.public.google_maps_api_key.clone(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/config", get(public_config))
}
