//! Authentication and authorization module
//!
//! This module provides stateless bearer-token authentication:
//! - Token issuance and verification (HMAC-signed, time-bound)
//! - Password hashing with Argon2
//! - Middleware for request authentication
//! - The account service for signup and login

pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use middleware::{auth_middleware, AuthContext, AuthError, AuthErrorBody};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AccountService, AuthOk, LoginRequest, SignupRequest};
pub use token::{Claims, TokenError, TokenService};
