//! Portfolio persistence: projects, sources and the links between them.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::portfolio::{NewProject, NewSource, Project, Source, SourceInput};

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Project with id {0} not found")]
    ProjectNotFound(i64),

    #[error("Source with id {0} was not found")]
    SourceNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Repository over projects and sources.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// All projects, most recently modified first.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    async fn get_project(&self, id: i64) -> Result<Project, StoreError>;

    /// Insert a project, creating or linking the sources it names.
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError>;

    /// Link an existing (by id) or new source to a project. Idempotent.
    async fn add_source(&self, project_id: i64, source: SourceInput) -> Result<Project, StoreError>;

    /// Unlink a source from a project. Idempotent.
    async fn remove_source(&self, project_id: i64, source_id: i64) -> Result<Project, StoreError>;

    /// Delete a project and its links. Deleting an absent project is a no-op.
    async fn delete_project(&self, id: i64) -> Result<(), StoreError>;

    /// All sources, ordered by id.
    async fn list_sources(&self) -> Result<Vec<Source>, StoreError>;

    async fn get_source(&self, id: i64) -> Result<Source, StoreError>;

    async fn create_source(&self, source: NewSource) -> Result<Source, StoreError>;

    /// Delete a source and its links.
    async fn delete_source(&self, id: i64) -> Result<(), StoreError>;
}

/// Reject blank names.
fn require_name(name: &str, what: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(format!("{what} name must not be empty")));
    }
    Ok(())
}

/// Validate a source link request that does not reference an existing source.
fn new_source_name(input: &SourceInput) -> Result<&str, StoreError> {
    let name = input.name.as_deref().unwrap_or_default();
    require_name(name, "Source")?;
    Ok(name)
}
