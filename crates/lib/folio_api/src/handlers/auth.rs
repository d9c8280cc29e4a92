//! Authentication request handlers.

use axum::extract::State;

use folio_core::auth::login::login;
use folio_core::models::auth::Credentials;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;

/// `POST /login`: exchange the admin credentials for a token.
///
/// The response body is the bare token string.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<Credentials>,
) -> AppResult<String> {
    let token = login(state.config.as_ref(), state.tokens.as_ref(), &body)?;
    Ok(token)
}
