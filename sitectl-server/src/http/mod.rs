//! HTTP layer
//!
//! Axum server with:
//! - `GET /api/sanity` content dispatch
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error bodies

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
