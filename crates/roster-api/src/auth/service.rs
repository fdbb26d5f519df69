//! Account service
//!
//! Signup and login over the document store, the password hasher, and the
//! token service. Sequencing is deliberate and kept from the service this
//! API replaces: the duplicate-check read happens before the insert (the
//! race between them is a documented property, not enforced away), the
//! password comparison only runs once a record was found, and a failed
//! last-login write never fails an otherwise valid login.

use super::password::{hash_password, verify_password, PasswordError};
use super::token::TokenService;
use crate::error::ApiError;
use chrono::Utc;
use roster_core::{StoreError, User, UserPatch, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Signup request body.
///
/// Wire field names (`nombre`, `pass`) are fixed by existing clients.
/// Fields are optional so absence reports as a 400 with the missing-fields
/// taxonomy instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "pass")]
    pub password: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    #[serde(rename = "pass")]
    pub password: Option<String>,
}

/// Successful signup/login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthOk {
    /// Always "OK"
    pub result: String,
    /// Freshly issued bearer credential
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: User,
}

impl AuthOk {
    fn new(token: String, user: User) -> Self {
        Self {
            result: "OK".to_string(),
            token,
            user,
        }
    }
}

/// Signup and login orchestration
pub struct AccountService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Create an account and issue its first token.
    ///
    /// Field validation happens before any store access. The existence check
    /// runs before the insert; concurrent signups with the same email can
    /// slip through that window since the store keeps no unique index.
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthOk, ApiError> {
        let name = request.name.unwrap_or_default();
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::MissingFields("name, email, password"));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        let hash = hash_blocking(password).await?;
        let now = Utc::now().timestamp();
        let stored = self.store.insert(User::new(name, email, hash, now)).await?;

        let token = self.tokens.issue(stored_id(&stored)?)?;
        Ok(AuthOk::new(token, stored))
    }

    /// Verify credentials, record the login, and issue a fresh token.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthOk, ApiError> {
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::MissingFields("email, password"));
        }

        let mut user = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::UnknownEmail)?;

        if !compare_blocking(password, user.password.clone()).await? {
            return Err(ApiError::WrongPassword);
        }

        let id = stored_id(&user)?.to_string();
        let now = Utc::now().timestamp();

        // A failed write here does not fail the login: the token is still
        // issued and the gap is only logged. Kept from the original service.
        if let Err(e) = self.store.update(&id, UserPatch::last_login(now)).await {
            tracing::warn!(error = %e, user = %id, "failed to record last login");
        }
        user.last_login = now;

        let token = self.tokens.issue(&id)?;
        Ok(AuthOk::new(token, user))
    }
}

fn stored_id(user: &User) -> Result<&str, ApiError> {
    user.id.as_deref().ok_or_else(|| {
        ApiError::Store(StoreError::Backend(
            "store returned a record without an id".to_string(),
        ))
    })
}

// Argon2 is CPU-bound; both directions run on the blocking pool so the
// request executor keeps serving other connections.

async fn hash_blocking(password: String) -> Result<String, ApiError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))??;
    Ok(hash)
}

async fn compare_blocking(password: String, hash: String) -> Result<bool, ApiError> {
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::VerificationFailed(e.to_string()))??;
    Ok(matches)
}
