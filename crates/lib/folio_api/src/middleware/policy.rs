//! Route policy: decides whether the (possibly absent) identity may
//! reach the requested route.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use folio_core::models::auth::{AuthenticatedUser, Authority};

use crate::error::AppError;
use crate::routes;

/// `/login` and every `GET` route are open; everything else needs the admin.
pub fn permits(method: &Method, path: &str, user: Option<&AuthenticatedUser>) -> bool {
    if path == routes::LOGIN || method == Method::GET {
        return true;
    }
    user.is_some_and(|u| u.has_authority(Authority::Admin))
}

/// Axum middleware enforcing [`permits`]. Must run inside `authorize`.
pub async fn enforce(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request.extensions().get::<AuthenticatedUser>();
    if !permits(request.method(), request.uri().path(), user) {
        debug!(method = %request.method(), path = %request.uri().path(), "access denied by route policy");
        return Err(AppError::Forbidden("Access denied".into()));
    }
    Ok(next.run(request).await)
}
