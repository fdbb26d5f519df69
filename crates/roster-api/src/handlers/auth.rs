//! Authentication API handlers
//!
//! Public signup/login/directory endpoints plus the protected `/me` lookup.
//!
//! Author: hephaex@gmail.com

use crate::auth::{AuthContext, AuthOk, LoginRequest, SignupRequest};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use roster_core::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Public projection of a user record: display name and email only
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub display_name: String,
    pub email: String,
}

impl From<User> for DirectoryEntry {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name,
            email: user.email,
        }
    }
}

/// List every account as a `{displayName, email}` projection
///
/// Public by design: it intentionally exposes nothing beyond the projection.
#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "auth",
    responses(
        (status = 200, description = "Directory of known accounts", body = [DirectoryEntry]),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    )
)]
pub async fn directory(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.store.find_all().await?;
    let entries: Vec<DirectoryEntry> = users.into_iter().map(DirectoryEntry::from).collect();
    Ok(Json(entries))
}

/// Create an account
///
/// # Responses
///
/// * `200 OK` - `{result:"OK", token, usuario}`
/// * `400 Bad Request` - required fields absent
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - store or hashing failure
#[utoipa::path(
    post,
    path = "/api/auth/reg",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = AuthOk),
        (status = 400, description = "Missing fields", body = crate::error::ErrorBody),
        (status = 409, description = "Duplicate email", body = crate::error::ErrorBody),
        (status = 500, description = "Server error", body = crate::error::ErrorBody),
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.accounts().signup(request).await?;
    Ok(Json(response))
}

/// Login with email and password
///
/// # Responses
///
/// * `200 OK` - `{result:"OK", token, usuario}`
/// * `400 Bad Request` - required fields absent
/// * `409 Conflict` - no account with that email (status kept for wire
///   compatibility)
/// * `401 Unauthorized` - password mismatch
/// * `500 Internal Server Error` - store failure
#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthOk),
        (status = 400, description = "Missing fields", body = crate::error::ErrorBody),
        (status = 401, description = "Password mismatch", body = crate::error::ErrorBody),
        (status = 409, description = "Unknown email", body = crate::error::ErrorBody),
        (status = 500, description = "Server error", body = crate::error::ErrorBody),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.accounts().login(request).await?;
    Ok(Json(response))
}

/// Return the record of the authenticated user
///
/// `null` if the record was removed after the token was issued.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "The authenticated user's record, null if removed", body = User),
        (status = 401, description = "Authentication failure", body = crate::auth::AuthErrorBody),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.store.find_by_id(&ctx.user_id).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_entry_projects_only_name_and_email() {
        let user = User {
            id: Some("u-1".to_string()),
            display_name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            password: "hash".to_string(),
            signup_date: 1,
            last_login: 2,
        };

        let json = serde_json::to_value(DirectoryEntry::from(user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"displayName": "Ana", "email": "a@x.com"})
        );
    }
}
