//! Request middleware, outermost first: CORS, token authorization, route policy.

pub mod auth;
pub mod cors;
pub mod policy;
