//! JWT token generation and verification (HS256).

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{AuthError, TokenError, TokenService};
use crate::config::{API_SECRET, ConfigSource};
use crate::models::auth::TokenClaims;

const ALGORITHM: Algorithm = Algorithm::HS256;
const ALGORITHM_NAME: &str = "HS256";

/// Only the `alg` field, read without `jsonwebtoken`'s closed algorithm enum.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// HS256 token service. The signing secret is read from the config source
/// on every call.
#[derive(Clone)]
pub struct JwtService {
    config: Arc<dyn ConfigSource>,
}

impl JwtService {
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        Self { config }
    }

    fn secret(&self) -> Result<String, AuthError> {
        Ok(self.config.get(API_SECRET)?)
    }
}

impl TokenService for JwtService {
    fn issue(
        &self,
        username: &str,
        authority: &str,
        issued_at: DateTime<Utc>,
        expiration: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let exp = expiration.timestamp();
        if exp <= iat {
            return Err(AuthError::InvalidLifetime);
        }

        let secret = self.secret()?;
        let claims = TokenClaims {
            jti: Uuid::new_v4().to_string(),
            sub: username.to_string(),
            authority: Some(authority.to_string()),
            iat,
            exp,
        };
        encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let secret = self.secret()?;

        if let Some(alg) = header_algorithm(token).filter(|alg| alg != ALGORITHM_NAME) {
            debug!(alg = %alg, "token rejected: unsupported algorithm");
            return Err(AuthError::InvalidToken(TokenError::Unsupported));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let kind = classify(token, &e);
                debug!(error = %e, kind = %kind, "token rejected");
                AuthError::InvalidToken(kind)
            })
    }
}

/// The `alg` named by the token's header, if the header is readable JSON.
fn header_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    serde_json::from_slice::<RawHeader>(&bytes)
        .ok()
        .map(|header| header.alg)
}

/// Collapse `jsonwebtoken` failures into the four rejection kinds.
fn classify(token: &str, error: &jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        ErrorKind::InvalidAlgorithm => TokenError::Unsupported,
        // With a readable header, a JSON failure comes from a payload that
        // passed the signature check but is not a claims object.
        ErrorKind::Json(_) if decode_header(token).is_ok() => TokenError::Unsupported,
        _ => TokenError::Malformed,
    }
}
