//! `GET /api/sanity`: the content query endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use crate::dispatch::{ContentResponse, DispatchError};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::request::{ContentRequest, RawQuery};

async fn query(
    State(state): State<Arc<AppState>>,
    raw: Result<Query<RawQuery>, QueryRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Query(raw) = raw.map_err(|e| {
        tracing::warn!(error = %e, "unreadable query string");
        ApiError::BadRequest {
            message: e.body_text(),
        }
    })?;

    tracing::info!(
        kind = raw.kind.as_deref(),
        menu_title = raw.menu_title.as_deref(),
        identifier = raw.identifier.as_deref(),
        identifier_type = raw.identifier_type.as_deref(),
        section_type = raw.section_type.as_deref(),
        title = raw.title.as_deref(),
        id = raw.id.as_deref(),
        limit = raw.limit.as_deref(),
        "content query"
    );

    let request = ContentRequest::try_from(raw).map_err(|e| {
        tracing::warn!(error = %e, "rejected content query");
        ApiError::from(DispatchError::from(e))
    })?;

    match state.dispatcher.dispatch(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            let api = ApiError::from(err);
            log_failure(&request, &api);
            Err(api)
        }
    }
}

fn log_failure(request: &ContentRequest, err: &ApiError) {
    let status = err.status().as_u16();
    match err {
        ApiError::Dispatch(DispatchError::NotFound { .. }) => {
            tracing::warn!(%request, status, "{}", err.message());
        }
        ApiError::Dispatch(DispatchError::Upstream(source)) => {
            tracing::error!(
                %request,
                status,
                upstream_status = source.status_code(),
                details = ?source.details(),
                source = ?source,
                "{}",
                err.message()
            );
        }
        ApiError::Dispatch(DispatchError::Decode { context, source }) => {
            tracing::error!(%request, status, context, %source, "{}", err.message());
        }
        other => tracing::warn!(%request, status, "{}", other.message()),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/sanity", get(query))
}
