//! User-record CRUD handlers
//!
//! Thin pass-throughs to the document store; every route here sits behind
//! the auth middleware. No business rules live in this file.
//!
//! Author: hephaex@gmail.com

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use roster_core::{User, UserPatch};
use std::sync::Arc;

/// List all user records
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "users",
    responses(
        (status = 200, description = "All user records", body = [User]),
        (status = 401, description = "Authentication failure", body = crate::auth::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let users = state.store.find_all().await?;
    Ok(Json(users))
}

/// Fetch one record by id; `null` when absent
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Store-assigned record id")),
    responses(
        (status = 200, description = "The record, null when absent", body = User),
        (status = 401, description = "Authentication failure", body = crate::auth::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.store.find_by_id(&id).await?;
    Ok(Json(user))
}

/// Insert a record as supplied
#[utoipa::path(
    post,
    path = "/api/user",
    tag = "users",
    request_body = User,
    responses(
        (status = 200, description = "Stored record with its assigned id", body = User),
        (status = 401, description = "Authentication failure", body = crate::auth::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state.store.insert(user).await?;
    Ok(Json(stored))
}

/// Apply a partial update to a record
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Store-assigned record id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Update report", body = roster_core::UpdateReport),
        (status = 401, description = "Authentication failure", body = crate::auth::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.store.update(&id, patch).await?;
    Ok(Json(report))
}

/// Remove a record by id
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Store-assigned record id")),
    responses(
        (status = 200, description = "Removal report", body = roster_core::RemoveReport),
        (status = 401, description = "Authentication failure", body = crate::auth::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.store.remove(&id).await?;
    Ok(Json(report))
}
