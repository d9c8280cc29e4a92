//! PostgreSQL-backed portfolio store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use super::{PortfolioStore, StoreError, new_source_name, require_name};
use crate::models::portfolio::{
    NewProject, NewSource, Project, ProjectSummary, Source, SourceInput, SourceSummary,
};

/// Row returned by project queries.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    description: Option<String>,
    detailed_description: Option<String>,
    preview_url: Option<String>,
    live_url: Option<String>,
    last_modified: DateTime<Utc>,
}

impl From<ProjectRow> for ProjectSummary {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            detailed_description: row.detailed_description,
            preview_url: row.preview_url,
            live_url: row.live_url,
            last_modified: row.last_modified,
        }
    }
}

impl ProjectRow {
    fn with_sources(self, sources: Vec<SourceSummary>) -> Project {
        Project {
            id: self.id,
            name: self.name,
            description: self.description,
            detailed_description: self.detailed_description,
            preview_url: self.preview_url,
            live_url: self.live_url,
            last_modified: self.last_modified,
            sources,
        }
    }
}

/// Row returned by source queries.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SourceRow {
    id: i64,
    name: String,
    url: Option<String>,
}

impl From<SourceRow> for SourceSummary {
    fn from(row: SourceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            url: row.url,
        }
    }
}

/// `(source_id, project columns...)` as returned by the source listing join.
type LinkedProjectRow = (
    i64,
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
);

const PROJECT_COLUMNS: &str =
    "p.id, p.name, p.description, p.detailed_description, p.preview_url, p.live_url, p.last_modified";

/// Portfolio store over a `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn sources_of(&self, project_id: i64) -> Result<Vec<SourceSummary>, StoreError> {
        let rows = sqlx::query_as::<_, SourceRow>(
            r#"
            SELECT s.id, s.name, s.url
            FROM sources s
            JOIN project_source ps ON ps.source_id = s.id
            WHERE ps.project_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SourceSummary::from).collect())
    }

    async fn projects_of(&self, source_id: i64) -> Result<Vec<ProjectSummary>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p \
             JOIN project_source ps ON ps.project_id = p.id \
             WHERE ps.source_id = $1 ORDER BY p.id"
        ))
        .bind(source_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ProjectSummary::from).collect())
    }
}

/// Fail with `ProjectNotFound` unless the project exists; locks the row.
async fn lock_project(conn: &mut PgConnection, project_id: i64) -> Result<(), StoreError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
        .bind(project_id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|_| ())
        .ok_or(StoreError::ProjectNotFound(project_id))
}

/// Resolve a link request to a source id, inserting a new source if needed.
async fn resolve_source(conn: &mut PgConnection, input: &SourceInput) -> Result<i64, StoreError> {
    if let Some(id) = input.id {
        return sqlx::query_scalar::<_, i64>("SELECT id FROM sources WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(StoreError::SourceNotFound(id));
    }
    let name = new_source_name(input)?;
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO sources (name, url) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(input.url.as_deref())
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

async fn link(conn: &mut PgConnection, project_id: i64, source_id: i64) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO project_source (project_id, source_id) VALUES ($1, $2) \
         ON CONFLICT DO NOTHING",
    )
    .bind(project_id)
    .bind(source_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn touch(conn: &mut PgConnection, project_id: i64) -> Result<(), StoreError> {
    sqlx::query("UPDATE projects SET last_modified = now() WHERE id = $1")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[async_trait]
impl PortfolioStore for PgStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p ORDER BY p.last_modified DESC, p.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let links = sqlx::query_as::<_, (i64, i64, String, Option<String>)>(
            r#"
            SELECT ps.project_id, s.id, s.name, s.url
            FROM project_source ps
            JOIN sources s ON s.id = ps.source_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_project: HashMap<i64, Vec<SourceSummary>> = HashMap::new();
        for (project_id, id, name, url) in links {
            by_project
                .entry(project_id)
                .or_default()
                .push(SourceSummary { id, name, url });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let sources = by_project.remove(&row.id).unwrap_or_default();
                row.with_sources(sources)
            })
            .collect())
    }

    async fn get_project(&self, id: i64) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::ProjectNotFound(id))?;
        let sources = self.sources_of(id).await?;
        Ok(row.with_sources(sources))
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        require_name(&project.name, "Project")?;
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO projects (name, description, detailed_description, preview_url, live_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&project.name)
        .bind(project.description.as_deref())
        .bind(project.detailed_description.as_deref())
        .bind(project.preview_url.as_deref())
        .bind(project.live_url.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        for input in &project.sources {
            let source_id = resolve_source(&mut *tx, input).await?;
            link(&mut *tx, id, source_id).await?;
        }

        tx.commit().await?;
        self.get_project(id).await
    }

    async fn add_source(&self, project_id: i64, source: SourceInput) -> Result<Project, StoreError> {
        let mut tx = self.pool.begin().await?;
        lock_project(&mut *tx, project_id).await?;
        let source_id = resolve_source(&mut *tx, &source).await?;
        link(&mut *tx, project_id, source_id).await?;
        touch(&mut *tx, project_id).await?;
        tx.commit().await?;
        self.get_project(project_id).await
    }

    async fn remove_source(&self, project_id: i64, source_id: i64) -> Result<Project, StoreError> {
        let mut tx = self.pool.begin().await?;
        lock_project(&mut *tx, project_id).await?;
        sqlx::query("DELETE FROM project_source WHERE project_id = $1 AND source_id = $2")
            .bind(project_id)
            .bind(source_id)
            .execute(&mut *tx)
            .await?;
        touch(&mut *tx, project_id).await?;
        tx.commit().await?;
        self.get_project(project_id).await
    }

    async fn delete_project(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_sources(&self) -> Result<Vec<Source>, StoreError> {
        let rows = sqlx::query_as::<_, SourceRow>("SELECT id, name, url FROM sources ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let links = sqlx::query_as::<_, LinkedProjectRow>(&format!(
            "SELECT ps.source_id, {PROJECT_COLUMNS} FROM project_source ps \
             JOIN projects p ON p.id = ps.project_id ORDER BY p.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut by_source: HashMap<i64, Vec<ProjectSummary>> = HashMap::new();
        for (source_id, id, name, description, detailed_description, preview_url, live_url, last_modified) in
            links
        {
            by_source.entry(source_id).or_default().push(ProjectSummary {
                id,
                name,
                description,
                detailed_description,
                preview_url,
                live_url,
                last_modified,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| Source {
                projects: by_source.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                url: row.url,
            })
            .collect())
    }

    async fn get_source(&self, id: i64) -> Result<Source, StoreError> {
        let row = sqlx::query_as::<_, SourceRow>("SELECT id, name, url FROM sources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::SourceNotFound(id))?;
        let projects = self.projects_of(id).await?;
        Ok(Source {
            id: row.id,
            name: row.name,
            url: row.url,
            projects,
        })
    }

    async fn create_source(&self, source: NewSource) -> Result<Source, StoreError> {
        require_name(&source.name, "Source")?;
        let row = sqlx::query_as::<_, SourceRow>(
            "INSERT INTO sources (name, url) VALUES ($1, $2) RETURNING id, name, url",
        )
        .bind(&source.name)
        .bind(source.url.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(Source {
            id: row.id,
            name: row.name,
            url: row.url,
            projects: Vec::new(),
        })
    }

    async fn delete_source(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::SourceNotFound(id));
        }
        Ok(())
    }
}
