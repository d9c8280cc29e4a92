//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use folio_core::auth::AuthError;
use folio_core::config::ConfigError;
use folio_core::store::StoreError;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AccessDenied => AppError::Forbidden(e.to_string()),
            AuthError::InvalidToken(kind) => AppError::Forbidden(kind.to_string()),
            AuthError::Config(e) => AppError::from(e),
            AuthError::InvalidLifetime | AuthError::Internal(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ProjectNotFound(_) | StoreError::SourceNotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            StoreError::Validation(msg) => AppError::Validation(msg),
            StoreError::DbError(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::auth::TokenError;

    use super::*;

    #[test]
    fn token_rejections_are_forbidden_with_their_message() {
        let err = AppError::from(AuthError::InvalidToken(TokenError::Expired));
        assert!(matches!(err, AppError::Forbidden(ref m) if m == "Token has expired"));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_config_is_a_server_error() {
        let err = AppError::from(AuthError::Config(ConfigError::Missing("API_SECRET".into())));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_map_to_http_statuses() {
        let not_found = AppError::from(StoreError::ProjectNotFound(3));
        assert!(matches!(not_found, AppError::NotFound(ref m) if m == "Project with id 3 not found"));

        let invalid = AppError::from(StoreError::Validation("bad".into()));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
