//! API route definitions
//!
//! Author: hephaex@gmail.com

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, users};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create API routes
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/auth", get(auth::directory).post(auth::login))
        .route("/api/auth/reg", post(auth::signup));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/user", get(users::list).post(users::create))
        .route(
            "/api/user/:id",
            get(users::get_one).put(users::update).delete(users::remove),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    // Combine routes
    Router::new().merge(public_routes).merge(protected_routes)
}
