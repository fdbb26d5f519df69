//! Token issuance and verification
//!
//! Stateless HMAC-SHA256 signed credentials. A token asserts that a subject
//! was authenticated at `iat` and stays valid until `exp`; there is no
//! server-side session state and no revocation list - expiry is the only
//! invalidation mechanism.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_core::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user's store-assigned identifier
    pub sub: String,
    /// Issued at (Unix epoch seconds)
    pub iat: u64,
    /// Expiration (Unix epoch seconds)
    pub exp: u64,
}

/// Token issuance and verification errors
///
/// `Expired` and `InvalidSignature` are distinguishable on purpose: the
/// middleware surfaces different messages for them, both as 401.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("access token has expired")]
    Expired,

    #[error("access token signature is invalid")]
    InvalidSignature,

    #[error("access token is malformed")]
    Malformed,

    #[error("failed to encode access token: {0}")]
    Encoding(String),

    #[error("system time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),
}

/// Issues and verifies signed, time-bound credentials.
///
/// Holds the process-wide signing secret, injected once at construction from
/// configuration so tests can run with their own keys.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity_secs: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validity_secs: config.token_validity_secs,
        }
    }

    /// Encode and sign a token for `subject`, valid from now for the
    /// configured window.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.validity_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Check signature and expiry, recovering the subject identifier.
    ///
    /// Never returns a partial identity: any failure is a typed error.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&AuthConfig {
            token_secret: secret.to_string(),
            token_validity_secs: 3600,
        })
    }

    #[test]
    fn issue_then_verify_recovers_the_subject() {
        let tokens = service("test-secret");
        let token = tokens.issue("user-42").expect("issue");
        assert_eq!(tokens.verify(&token).expect("verify"), "user-42");
    }

    #[test]
    fn garbage_is_malformed() {
        let tokens = service("test-secret");
        assert!(matches!(
            tokens.verify("not.a.token"),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn wrong_secret_is_an_invalid_signature() {
        let token = service("secret-one").issue("user-1").unwrap();
        let result = service("secret-two").verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let tokens = service("test-secret");
        let token = tokens.issue("user-1").unwrap();

        // flip a character inside the payload segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let payload = parts[1].clone();
        let flipped = if payload.starts_with('A') { "B" } else { "A" };
        parts[1] = format!("{flipped}{}", &payload[1..]);
        let tampered = parts.join(".");

        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn expired_token_fails_with_the_expired_kind() {
        let tokens = service("test-secret");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = Claims {
            sub: "user-1".to_string(),
            iat: now - 7200, // issued 2 hours ago
            exp: now - 3600, // expired 1 hour ago
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    proptest! {
        #[test]
        fn round_trip_holds_for_any_subject(subject in "[a-zA-Z0-9:_-]{1,64}") {
            let tokens = service("prop-secret");
            let token = tokens.issue(&subject).unwrap();
            prop_assert_eq!(tokens.verify(&token).unwrap(), subject);
        }
    }
}
