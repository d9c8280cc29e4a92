//! Authentication domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Login request body. Lives only for the duration of the request.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The one privileged role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Admin,
}

impl Authority {
    pub fn as_str(self) -> &'static str {
        match self {
            Authority::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Token id (standard JWT `jti` claim).
    pub jti: String,
    /// Subject: the admin username.
    pub sub: String,
    /// Granted authority (e.g. `"ADMIN"`). Absent on anonymous tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    /// Issued at (unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (unix timestamp, seconds).
    pub exp: i64,
}

/// Identity established for the current request from a validated token.
///
/// Stored in the request extensions by the authorization middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub authority: String,
}

impl AuthenticatedUser {
    /// Build an identity from claims. Returns `None` when the token carries
    /// no (or an empty) authority.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        match claims.authority {
            Some(authority) if !authority.is_empty() => Some(Self {
                username: claims.sub,
                authority,
            }),
            _ => None,
        }
    }

    pub fn has_authority(&self, authority: Authority) -> bool {
        self.authority == authority.as_str()
    }
}
