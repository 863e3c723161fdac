//! API error type with IntoResponse.
//!
//! Every failure leaves the endpoint as `{statusCode, message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::dispatch::DispatchError;

const UPSTREAM_PREFIX: &str = "Error fetching data from Sanity";

#[derive(Debug)]
pub enum ApiError {
    /// Query string could not be read at all (400)
    BadRequest { message: String },

    /// Anything the dispatcher reported
    Dispatch(DispatchError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Dispatch(err) => match err {
                DispatchError::Request(_) => StatusCode::BAD_REQUEST,
                DispatchError::NotFound { .. } => StatusCode::NOT_FOUND,
                // upstream status only when it is an actual error status
                DispatchError::Upstream(e) => e
                    .status_code()
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                DispatchError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { message } => message.clone(),
            Self::Dispatch(err @ (DispatchError::Request(_) | DispatchError::NotFound { .. })) => {
                err.to_string()
            }
            Self::Dispatch(err) => format!("{UPSTREAM_PREFIX}: {err}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            status_code: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}
