//! Process-environment config source.

use std::env::VarError;

use super::{ConfigError, ConfigSource};

/// Reads values from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Result<String, ConfigError> {
        std::env::var(key).map_err(|e| match e {
            VarError::NotPresent => ConfigError::Missing(key.to_string()),
            VarError::NotUnicode(_) => ConfigError::NotUnicode(key.to_string()),
        })
    }
}
