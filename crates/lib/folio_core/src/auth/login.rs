//! Admin login: compares credentials against configuration and issues a token.

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::{AuthError, TokenService};
use crate::config::{ADMIN_PASSWORD, ADMIN_USERNAME, ConfigSource};
use crate::models::auth::{Authority, Credentials};

/// Access token lifetime: 2 hours.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 2 * 60 * 60;

/// Authenticate the single admin and return a signed access token.
///
/// Both configured values are read before comparing, so a missing
/// `ADMIN_USERNAME` or `ADMIN_PASSWORD` always surfaces as a config error.
pub fn login(
    config: &dyn ConfigSource,
    tokens: &dyn TokenService,
    credentials: &Credentials,
) -> Result<String, AuthError> {
    let admin_username = config.get(ADMIN_USERNAME)?;
    let admin_password = config.get(ADMIN_PASSWORD)?;

    if credentials.username != admin_username || credentials.password != admin_password {
        warn!(username = %credentials.username, "login denied");
        return Err(AuthError::AccessDenied);
    }

    let now = Utc::now();
    let token = tokens.issue(
        &credentials.username,
        Authority::Admin.as_str(),
        now,
        now + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS),
    )?;
    info!(username = %credentials.username, "admin logged in");
    Ok(token)
}
