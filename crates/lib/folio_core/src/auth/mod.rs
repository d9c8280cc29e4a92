//! Authentication and authorization logic.
//!
//! Token issuance/verification and the admin login flow, shared by the
//! HTTP layer in `folio_api`.

pub mod jwt;
pub mod login;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::ConfigError;
use crate::models::auth::TokenClaims;

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token type is not supported")]
    Unsupported,

    #[error("Token signature does not match")]
    SignatureMismatch,
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username or password was incorrect")]
    AccessDenied,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidToken(#[from] TokenError),

    #[error("Token expiration must be after its issue time")]
    InvalidLifetime,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Issues and verifies bearer tokens.
pub trait TokenService: Send + Sync {
    /// Sign a token for `username` holding `authority`, valid until `expiration`.
    fn issue(
        &self,
        username: &str,
        authority: &str,
        issued_at: DateTime<Utc>,
        expiration: DateTime<Utc>,
    ) -> Result<String, AuthError>;

    /// Verify `token` and return its claims.
    ///
    /// Rejections surface as [`AuthError::InvalidToken`]; a missing signing
    /// secret surfaces as [`AuthError::Config`].
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
