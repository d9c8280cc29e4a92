//! Configuration access: named secrets read at the moment they are needed.
//!
//! Nothing in this module caches values: every [`ConfigSource::get`] call
//! goes back to the underlying provider, so a rotated secret is picked up
//! by the very next token issued or verified.

pub mod env;
pub mod map;

pub use env::EnvConfigSource;
pub use map::MapConfigSource;

use thiserror::Error;

/// Configured admin username.
pub const ADMIN_USERNAME: &str = "ADMIN_USERNAME";

/// Configured admin password.
pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

/// HMAC signing secret for access tokens.
pub const API_SECRET: &str = "API_SECRET";

/// Origin allowed by the CORS layer.
pub const APPLICATION_URL: &str = "APPLICATION_URL";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set.")]
    Missing(String),

    #[error("Environment variable {0} is not valid unicode.")]
    NotUnicode(String),
}

/// Provider of named configuration values.
pub trait ConfigSource: Send + Sync {
    /// Look up `key`, failing if it is absent. Never falls back to a default.
    fn get(&self, key: &str) -> Result<String, ConfigError>;
}
