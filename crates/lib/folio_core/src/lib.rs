//! # folio_core
//!
//! Core domain logic for Folio: configuration access, token issuance and
//! verification, the admin login flow and the portfolio store.

pub mod auth;
pub mod config;
pub mod migrate;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
