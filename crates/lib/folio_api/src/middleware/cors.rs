//! CORS layer. The allowed origin is `APPLICATION_URL`, read per request.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method, request::Parts};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use folio_core::config::{APPLICATION_URL, ConfigSource};

/// Preflight cache lifetime.
const MAX_AGE: Duration = Duration::from_secs(180);

/// Whether `origin` is the configured application URL.
fn origin_allowed(config: &dyn ConfigSource, origin: &HeaderValue) -> bool {
    match config.get(APPLICATION_URL) {
        Ok(url) => origin.as_bytes() == url.as_bytes(),
        Err(e) => {
            warn!(error = %e, "no CORS origin configured");
            false
        }
    }
}

/// Build the CORS layer for the router.
pub fn layer(config: Arc<dyn ConfigSource>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| origin_allowed(config.as_ref(), origin),
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(MAX_AGE)
}
