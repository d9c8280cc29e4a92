//! # folio_api
//!
//! HTTP API library for Folio.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};

use folio_core::auth::TokenService;
use folio_core::auth::jwt::JwtService;
use folio_core::config::ConfigSource;
use folio_core::store::PortfolioStore;

use crate::handlers::{auth, projects, sources};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Project/source persistence.
    pub store: Arc<dyn PortfolioStore>,
    /// Secrets and other named settings, read per use.
    pub config: Arc<dyn ConfigSource>,
    /// Token issuance and verification.
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// State with the HS256 token service over `config`.
    pub fn new(store: Arc<dyn PortfolioStore>, config: Arc<dyn ConfigSource>) -> Self {
        let tokens = Arc::new(JwtService::new(config.clone()));
        Self {
            store,
            config,
            tokens,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = middleware::cors::layer(state.config.clone());

    Router::new()
        .route(routes::LOGIN, post(auth::login_handler))
        .route(routes::PROJECTS, get(projects::list_projects_handler))
        .route(routes::PROJECT, get(projects::get_project_handler))
        .route(
            routes::PROJECTS_CREATE,
            post(projects::create_project_handler),
        )
        .route(
            routes::PROJECT_SOURCES_ADD,
            put(projects::add_source_handler),
        )
        .route(
            routes::PROJECT_SOURCES_REMOVE,
            put(projects::remove_source_handler),
        )
        .route(
            routes::PROJECTS_DELETE,
            delete(projects::delete_project_handler),
        )
        .route(routes::SOURCES, get(sources::list_sources_handler))
        .route(routes::SOURCE, get(sources::get_source_handler))
        .route(routes::SOURCES_CREATE, post(sources::create_source_handler))
        .route(routes::SOURCE_DELETE, delete(sources::delete_source_handler))
        .layer(axum::middleware::from_fn(middleware::policy::enforce))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authorize,
        ))
        .layer(cors)
        .with_state(state)
}
