//! Ambient HTTP middleware
//!
//! Author: hephaex@gmail.com

pub mod security_headers;

pub use security_headers::security_headers_middleware;

use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Count every request into the shared state, feeding `/metrics`
pub async fn count_requests(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    state.increment_requests();
    next.run(request).await
}
