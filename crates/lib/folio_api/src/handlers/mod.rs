//! Request handlers.

pub mod auth;
pub mod projects;
pub mod sources;
