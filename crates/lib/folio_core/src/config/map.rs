//! In-memory config source.

use dashmap::DashMap;

use super::{ConfigError, ConfigSource};

/// Concurrent key/value config source whose entries can be replaced at runtime.
///
/// Used by tests and by embedders that manage secrets themselves.
#[derive(Debug, Default)]
pub struct MapConfigSource {
    values: DashMap<String, String>,
}

impl MapConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source pre-populated with `entries`.
    pub fn from_pairs<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let source = Self::new();
        for (k, v) in entries {
            source.set(k, v);
        }
        source
    }

    /// Insert or replace a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a value; later lookups fail with [`ConfigError::Missing`].
    pub fn remove(&self, key: &str) {
        self.values.remove(key);
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .map(|v| v.value().clone())
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_missing_for_unknown_key() {
        let source = MapConfigSource::new();
        assert_eq!(
            source.get("API_SECRET"),
            Err(ConfigError::Missing("API_SECRET".into()))
        );
    }

    #[test]
    fn set_replaces_previous_value() {
        let source = MapConfigSource::from_pairs([("API_SECRET", "first")]);
        assert_eq!(source.get("API_SECRET").unwrap(), "first");
        source.set("API_SECRET", "second");
        assert_eq!(source.get("API_SECRET").unwrap(), "second");
    }

    #[test]
    fn remove_makes_key_missing() {
        let source = MapConfigSource::from_pairs([("ADMIN_USERNAME", "root")]);
        source.remove("ADMIN_USERNAME");
        assert!(source.get("ADMIN_USERNAME").is_err());
    }
}
