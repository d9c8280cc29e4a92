//! Route paths.

pub const LOGIN: &str = "/login";

pub const PROJECTS: &str = "/projects";
pub const PROJECT: &str = "/project/{id}";
pub const PROJECTS_CREATE: &str = "/projects/create";
pub const PROJECT_SOURCES_ADD: &str = "/project/{id}/sources/add";
pub const PROJECT_SOURCES_REMOVE: &str = "/project/{id}/sources/remove";
pub const PROJECTS_DELETE: &str = "/projects/delete";

pub const SOURCES: &str = "/sources";
pub const SOURCE: &str = "/source/{id}";
pub const SOURCES_CREATE: &str = "/sources/create";
pub const SOURCE_DELETE: &str = "/source/{id}/delete";
