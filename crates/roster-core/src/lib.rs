//! roster core - domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the roster
//! service:
//! - The user record model and its wire representation
//! - The document-store trait the API is written against
//! - An in-memory reference store for development and tests
//! - Common error types
//! - Configuration management

pub mod config;
pub mod memory;

pub use config::{AppConfig, AuthConfig, ConfigError, LoggingConfig, ServerConfig};
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by a user store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// User Model
// ============================================================================

/// A user record as held by the document store.
///
/// Wire field names (`displayName`, `signupDate`, `lastLogin`) are fixed by
/// existing clients of the service and must not change. Timestamps are epoch
/// seconds. The `password` field holds the Argon2 PHC hash, never the
/// plaintext, and never serializes in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier, absent until insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub display_name: String,

    /// Unique, compared case-sensitively as stored
    pub email: String,

    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password: String,

    #[serde(default)]
    pub signup_date: i64,

    #[serde(default)]
    pub last_login: i64,
}

impl User {
    /// Create a new record with signup time = last login time = `now`
    pub fn new(display_name: String, email: String, password_hash: String, now: i64) -> Self {
        Self {
            id: None, // assigned by the store
            display_name,
            email,
            password: password_hash,
            signup_date: now,
            last_login: now,
        }
    }
}

/// Partial update applied to a stored user record.
///
/// Fields left `None` are untouched, mirroring a `$set` with only the
/// supplied keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<i64>,
}

impl UserPatch {
    /// Patch that only bumps the last-login timestamp
    pub fn last_login(ts: i64) -> Self {
        Self {
            last_login: Some(ts),
            ..Self::default()
        }
    }

    /// Apply this patch to a record, returning whether anything changed
    pub fn apply(&self, user: &mut User) -> bool {
        let before = user.clone();
        if let Some(name) = &self.display_name {
            user.display_name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        if let Some(ts) = self.last_login {
            user.last_login = ts;
        }
        *user != before
    }
}

/// Outcome of an update by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateReport {
    /// Records matching the filter
    pub matched: u64,
    /// Records actually changed
    pub modified: u64,
}

/// Outcome of a removal by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemoveReport {
    pub removed: u64,
}

// ============================================================================
// Store Trait
// ============================================================================

/// The document-store collaborator the service is written against.
///
/// Implementations provide find/insert/update/remove over user records.
/// Uniqueness of `email` is NOT enforced here: the duplicate check belongs to
/// the account service, and the read-then-insert window it implies is a
/// documented property of the system.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Exact, case-sensitive match on the stored email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persist a new record, assigning its id
    async fn insert(&self, user: User) -> Result<User>;

    async fn update(&self, id: &str, patch: UserPatch) -> Result<UpdateReport>;

    async fn remove(&self, id: &str) -> Result<RemoveReport>;
}
