//! In-memory portfolio store, used by tests and by the server when no
//! database URL is configured.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{PortfolioStore, StoreError, new_source_name, require_name};
use crate::models::portfolio::{
    NewProject, NewSource, Project, ProjectSummary, Source, SourceInput, SourceSummary,
};

#[derive(Debug, Clone)]
struct SourceRow {
    name: String,
    url: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    projects: BTreeMap<i64, ProjectSummary>,
    sources: BTreeMap<i64, SourceRow>,
    /// `(project_id, source_id)` pairs.
    links: BTreeSet<(i64, i64)>,
    last_project_id: i64,
    last_source_id: i64,
}

impl Tables {
    fn project(&self, id: i64) -> Result<Project, StoreError> {
        let row = self
            .projects
            .get(&id)
            .ok_or(StoreError::ProjectNotFound(id))?;
        let sources = self
            .links
            .range((id, i64::MIN)..=(id, i64::MAX))
            .filter_map(|&(_, source_id)| self.source_summary(source_id))
            .collect();
        Ok(Project {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            detailed_description: row.detailed_description.clone(),
            preview_url: row.preview_url.clone(),
            live_url: row.live_url.clone(),
            last_modified: row.last_modified,
            sources,
        })
    }

    fn source(&self, id: i64) -> Result<Source, StoreError> {
        let row = self.sources.get(&id).ok_or(StoreError::SourceNotFound(id))?;
        let projects = self
            .links
            .iter()
            .filter(|&&(_, source_id)| source_id == id)
            .filter_map(|(project_id, _)| self.projects.get(project_id).cloned())
            .collect();
        Ok(Source {
            id,
            name: row.name.clone(),
            url: row.url.clone(),
            projects,
        })
    }

    fn source_summary(&self, id: i64) -> Option<SourceSummary> {
        self.sources.get(&id).map(|row| SourceSummary {
            id,
            name: row.name.clone(),
            url: row.url.clone(),
        })
    }

    /// Check a link request without mutating anything.
    fn check_source_input(&self, input: &SourceInput) -> Result<(), StoreError> {
        match input.id {
            Some(id) if self.sources.contains_key(&id) => Ok(()),
            Some(id) => Err(StoreError::SourceNotFound(id)),
            None => new_source_name(input).map(|_| ()),
        }
    }

    /// Resolve a checked link request to a source id, inserting if needed.
    fn resolve_source(&mut self, input: SourceInput) -> i64 {
        match input.id {
            Some(id) => id,
            None => self.insert_source(input.name.unwrap_or_default(), input.url),
        }
    }

    fn insert_source(&mut self, name: String, url: Option<String>) -> i64 {
        self.last_source_id += 1;
        let id = self.last_source_id;
        self.sources.insert(id, SourceRow { name, url });
        id
    }

    fn touch(&mut self, project_id: i64, now: DateTime<Utc>) {
        if let Some(row) = self.projects.get_mut(&project_id) {
            row.last_modified = now;
        }
    }
}

/// Portfolio store held entirely in memory behind a single lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let tables = self.tables.read().await;
        let mut projects = tables
            .projects
            .keys()
            .map(|&id| tables.project(id))
            .collect::<Result<Vec<_>, _>>()?;
        projects.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(projects)
    }

    async fn get_project(&self, id: i64) -> Result<Project, StoreError> {
        self.tables.read().await.project(id)
    }

    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        require_name(&project.name, "Project")?;
        let mut tables = self.tables.write().await;
        for input in &project.sources {
            tables.check_source_input(input)?;
        }

        tables.last_project_id += 1;
        let id = tables.last_project_id;
        tables.projects.insert(
            id,
            ProjectSummary {
                id,
                name: project.name,
                description: project.description,
                detailed_description: project.detailed_description,
                preview_url: project.preview_url,
                live_url: project.live_url,
                last_modified: Utc::now(),
            },
        );
        for input in project.sources {
            let source_id = tables.resolve_source(input);
            tables.links.insert((id, source_id));
        }
        tables.project(id)
    }

    async fn add_source(&self, project_id: i64, source: SourceInput) -> Result<Project, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&project_id) {
            return Err(StoreError::ProjectNotFound(project_id));
        }
        tables.check_source_input(&source)?;
        let source_id = tables.resolve_source(source);
        tables.links.insert((project_id, source_id));
        tables.touch(project_id, Utc::now());
        tables.project(project_id)
    }

    async fn remove_source(&self, project_id: i64, source_id: i64) -> Result<Project, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&project_id) {
            return Err(StoreError::ProjectNotFound(project_id));
        }
        tables.links.remove(&(project_id, source_id));
        tables.touch(project_id, Utc::now());
        tables.project(project_id)
    }

    async fn delete_project(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.projects.remove(&id);
        tables.links.retain(|&(project_id, _)| project_id != id);
        Ok(())
    }

    async fn list_sources(&self) -> Result<Vec<Source>, StoreError> {
        let tables = self.tables.read().await;
        tables.sources.keys().map(|&id| tables.source(id)).collect()
    }

    async fn get_source(&self, id: i64) -> Result<Source, StoreError> {
        self.tables.read().await.source(id)
    }

    async fn create_source(&self, source: NewSource) -> Result<Source, StoreError> {
        require_name(&source.name, "Source")?;
        let mut tables = self.tables.write().await;
        let id = tables.insert_source(source.name, source.url);
        tables.source(id)
    }

    async fn delete_source(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.sources.remove(&id).is_none() {
            return Err(StoreError::SourceNotFound(id));
        }
        tables.links.retain(|&(_, source_id)| source_id != id);
        Ok(())
    }
}
