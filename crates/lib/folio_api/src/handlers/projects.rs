//! Project request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use folio_core::models::portfolio::{EntityRef, NewProject, Project, SourceInput};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};

/// `GET /projects`: all projects, most recently modified first.
pub async fn list_projects_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.store.list_projects().await?))
}

/// `GET /project/{id}`
pub async fn get_project_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.store.get_project(id).await?))
}

/// `POST /projects/create`
pub async fn create_project_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<NewProject>,
) -> AppResult<Json<Project>> {
    let project = state.store.create_project(body).await?;
    info!(id = project.id, name = %project.name, "project created");
    Ok(Json(project))
}

/// `PUT /project/{id}/sources/add`: link an existing or new source.
pub async fn add_source_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<SourceInput>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.store.add_source(id, body).await?))
}

/// `PUT /project/{id}/sources/remove`
pub async fn remove_source_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<EntityRef>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.store.remove_source(id, body.id).await?))
}

/// `DELETE /projects/delete`
pub async fn delete_project_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<EntityRef>,
) -> AppResult<StatusCode> {
    state.store.delete_project(body.id).await?;
    info!(id = body.id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}
