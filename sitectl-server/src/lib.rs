//! sitectl-server: the `/api/sanity` content endpoint
//!
//! Turns query-string requests into fixed GROQ queries against the
//! content store and answers with normalized records.

pub mod content;
pub mod dispatch;
pub mod http;
pub mod queries;
pub mod request;

pub use content::{ContentError, ContentStore, QueryParams, SanityClient};
pub use dispatch::{ContentResponse, DispatchError, Dispatcher};
pub use http::{build_router, run_server, ApiError, AppState, ServerError};
pub use request::{ContentRequest, PageLookup, RawQuery, RequestError};
