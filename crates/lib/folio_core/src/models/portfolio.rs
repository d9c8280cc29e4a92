//! Portfolio domain models: projects, sources and the requests that create them.
//!
//! JSON field names follow the public API (`detailedDescription`, `previewURL`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio project with the sources linked to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    #[serde(rename = "previewURL")]
    pub preview_url: Option<String>,
    #[serde(rename = "liveURL")]
    pub live_url: Option<String>,
    pub last_modified: DateTime<Utc>,
    pub sources: Vec<SourceSummary>,
}

/// A project as rendered inside a [`Source`] (no nested sources).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    #[serde(rename = "previewURL")]
    pub preview_url: Option<String>,
    #[serde(rename = "liveURL")]
    pub live_url: Option<String>,
    pub last_modified: DateTime<Utc>,
}

/// A source (code repository, article, ...) with the projects that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
    pub projects: Vec<ProjectSummary>,
}

/// A source as rendered inside a [`Project`] (no nested projects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
}

/// Body of `POST /projects/create`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_description: Option<String>,
    #[serde(default, rename = "previewURL")]
    pub preview_url: Option<String>,
    #[serde(default, rename = "liveURL")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceInput>,
}

/// Body of `POST /sources/create`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A source to link to a project: an existing one by `id`, or a new one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A bare `{ "id": n }` reference.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}
