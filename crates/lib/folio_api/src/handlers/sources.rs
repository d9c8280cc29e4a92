//! Source request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use folio_core::models::portfolio::{NewSource, Source};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};

/// `GET /sources`
pub async fn list_sources_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Source>>> {
    Ok(Json(state.store.list_sources().await?))
}

/// `GET /source/{id}`
pub async fn get_source_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Source>> {
    Ok(Json(state.store.get_source(id).await?))
}

/// `POST /sources/create`
pub async fn create_source_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewSource>,
) -> AppResult<Json<Source>> {
    let source = state.store.create_source(body).await?;
    info!(id = source.id, name = %source.name, "source created");
    Ok(Json(source))
}

/// `DELETE /source/{id}/delete`
pub async fn delete_source_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    state.store.delete_source(id).await?;
    info!(id, "source deleted");
    Ok(StatusCode::NO_CONTENT)
}
