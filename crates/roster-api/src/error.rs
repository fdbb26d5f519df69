//! API error handling
//!
//! Business failures answer with the `{result:"NO", msg}` envelope the
//! service's existing clients expect. Authentication middleware failures use
//! a separate `{result:"KO", message}` envelope (see `auth::middleware`);
//! the two shapes are preserved verbatim for wire compatibility.
//!
//! Author: hephaex@gmail.com

use crate::auth::password::PasswordError;
use crate::auth::token::TokenError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Business-failure response envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always "NO"
    pub result: String,
    /// Human-readable reason
    pub msg: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            result: "NO".to_string(),
            msg: msg.into(),
        }
    }
}

/// Application error type for the account and user routes
#[derive(Debug)]
pub enum ApiError {
    /// Required request fields absent or empty; names listed for the client
    MissingFields(&'static str),
    /// Signup against an email that already has an account
    EmailTaken,
    /// Login against an email with no account.
    /// Answered with 409, not 404 - inherited from the service this API
    /// replaces and kept for wire compatibility.
    UnknownEmail,
    /// Login with a password that does not match the stored hash
    WrongPassword,
    Store(roster_core::StoreError),
    Hash(PasswordError),
    Token(TokenError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(format!("missing required fields: {fields}")),
            ),
            ApiError::EmailTaken => (
                StatusCode::CONFLICT,
                ErrorBody::new("an account with that email already exists"),
            ),
            ApiError::UnknownEmail => (
                StatusCode::CONFLICT,
                ErrorBody::new("no account with that email"),
            ),
            ApiError::WrongPassword => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("password does not match"),
            ),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("server error"))
            }
            ApiError::Hash(e) => {
                tracing::error!(error = %e, "password hashing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("server error"))
            }
            ApiError::Token(e) => {
                tracing::error!(error = %e, "token issuance failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new("server error"))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<roster_core::StoreError> for ApiError {
    fn from(err: roster_core::StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Hash(err)
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Token(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_the_no_taxonomy() {
        let body = ErrorBody::new("server error");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["result"], "NO");
        assert_eq!(json["msg"], "server error");
    }
}
