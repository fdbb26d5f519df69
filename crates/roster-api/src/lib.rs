//! roster API - REST server
//!
//! HTTP endpoints for the user directory: bearer-token authentication
//! (signup, login, verification middleware) and user-record pass-throughs
//! to the document store.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::directory,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::me,
        handlers::users::list,
        handlers::users::get_one,
        handlers::users::create,
        handlers::users::update,
        handlers::users::remove,
        handlers::health::health_check,
        handlers::health::metrics,
    ),
    components(schemas(
        roster_core::User,
        roster_core::UserPatch,
        roster_core::UpdateReport,
        roster_core::RemoveReport,
        auth::SignupRequest,
        auth::LoginRequest,
        auth::AuthOk,
        auth::AuthErrorBody,
        error::ErrorBody,
        handlers::auth::DirectoryEntry,
        handlers::health::HealthResponse,
        handlers::health::MetricsResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup, login, and identity"),
        (name = "users", description = "User record pass-throughs"),
        (name = "health", description = "Liveness and metrics"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Assemble the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let api = routes::api_routes(state.clone())
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::metrics))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::count_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        // the service this API replaces answered `*` for origin, methods,
        // and headers alike
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
