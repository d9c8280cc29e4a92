//! Authorization middleware: token extraction and verification.
//!
//! Runs on every request. A request without an `Authorization` header passes
//! through with no identity; a valid token carrying an authority attaches an
//! [`AuthenticatedUser`]; a valid token without one passes through with no
//! identity; an invalid token ends the request with `403 Forbidden`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use folio_core::auth::AuthError;
use folio_core::models::auth::AuthenticatedUser;

use crate::AppState;
use crate::error::AppError;

/// Accepted scheme prefixes, stripped before verification.
const SCHEMES: [&str; 2] = ["Bearer ", "token "];

/// Strip an optional scheme prefix from an `Authorization` header value.
pub fn extract_token(header: &str) -> &str {
    let header = header.trim();
    SCHEMES
        .iter()
        .find_map(|scheme| header.strip_prefix(scheme))
        .map_or(header, str::trim)
}

/// Axum middleware: verifies the `Authorization` token, if any, and
/// records the resulting identity in the request extensions.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Identity only ever comes from this request's own token.
    request.extensions_mut().remove::<AuthenticatedUser>();

    let Some(value) = request.headers().get(AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };
    let header = value
        .to_str()
        .map_err(|_| AppError::Forbidden("Token is malformed".into()))?;

    match state.tokens.verify(extract_token(header)) {
        Ok(claims) => match AuthenticatedUser::from_claims(claims) {
            Some(user) => {
                debug!(username = %user.username, authority = %user.authority, "request authenticated");
                request.extensions_mut().insert(user);
            }
            None => debug!("token carries no authority, continuing anonymously"),
        },
        Err(AuthError::InvalidToken(kind)) => {
            debug!(kind = %kind, "rejecting request with invalid token");
            return Err(AppError::Forbidden(kind.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_token_is_used_as_is() {
        assert_eq!(extract_token("aaa.bbb.ccc"), "aaa.bbb.ccc");
    }

    #[test]
    fn scheme_prefixes_are_stripped() {
        assert_eq!(extract_token("Bearer aaa.bbb.ccc"), "aaa.bbb.ccc");
        assert_eq!(extract_token("token aaa.bbb.ccc"), "aaa.bbb.ccc");
        assert_eq!(extract_token("  Bearer   aaa.bbb.ccc "), "aaa.bbb.ccc");
    }

    #[test]
    fn unknown_scheme_is_left_for_the_codec_to_reject() {
        assert_eq!(extract_token("Basic cm9vdDpyb290"), "Basic cm9vdDpyb290");
    }
}
