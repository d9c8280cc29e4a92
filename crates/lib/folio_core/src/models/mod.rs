//! Domain models shared by the API layer and the store.

pub mod auth;
pub mod portfolio;
