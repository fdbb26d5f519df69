/// Authentication middleware for protecting routes
///
/// Extracts the bearer credential from the Authorization header, verifies it
/// through the token service held in application state, and attaches the
/// resolved identity to request extensions. Verification failures
/// short-circuit with a 401 and the `{result:"KO", message}` envelope; no
/// downstream handler runs. The middleware performs no writes.
use super::token::TokenError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

/// Identity resolved for one request.
///
/// Inserted into request extensions on successful verification; handlers
/// read it with `Extension<AuthContext>`. Dropped with the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user's store-assigned identifier
    pub user_id: String,
    /// The raw credential as presented
    pub token: String,
}

/// Authentication middleware failures
///
/// A header without a token segment is reported distinctly from a missing
/// header, matching the behavior clients already depend on.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Bearer authentication header not found [Authorization: Bearer jwtToken]")]
    MissingHeader,

    #[error("access token not found in the Authorization header [Authorization: Bearer jwtToken]")]
    MissingToken,

    #[error(transparent)]
    InvalidToken(#[from] TokenError),
}

/// Auth-failure response envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthErrorBody {
    /// Always "KO"
    pub result: String,
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = AuthErrorBody {
            result: "KO".to_string(),
            message: self.to_string(),
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Require a valid bearer token; attach `AuthContext` and continue.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    // Header format is "Bearer <token>"; the second whitespace-separated
    // segment is the credential. The scheme word itself is not validated,
    // matching what clients were already sending.
    let token = auth_header
        .split_whitespace()
        .nth(1)
        .ok_or(AuthError::MissingToken)?
        .to_string();

    let user_id = state.tokens.verify(&token)?;

    request.extensions_mut().insert(AuthContext {
        user_id,
        token,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_and_missing_token_have_distinct_messages() {
        let header_msg = AuthError::MissingHeader.to_string();
        let token_msg = AuthError::MissingToken.to_string();

        assert_ne!(header_msg, token_msg);
        assert!(header_msg.contains("header not found"));
        assert!(token_msg.contains("token not found"));
    }

    #[test]
    fn expired_and_invalid_signature_are_distinguishable() {
        let expired = AuthError::InvalidToken(TokenError::Expired).to_string();
        let forged = AuthError::InvalidToken(TokenError::InvalidSignature).to_string();
        assert_ne!(expired, forged);
    }

    #[test]
    fn failures_render_the_ko_envelope() {
        let response = AuthError::MissingHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
