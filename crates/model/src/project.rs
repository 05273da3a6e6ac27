use serde::{Deserialize, Serialize};

use crate::DOCUMENT_FOLDERS;

/// Derive a project identifier from its display name: lowercase, spaces
/// replaced with underscores. Distinct display names can collide ("Site A"
/// and "site a" share a slug); the store treats the second create as a no-op.
#[must_use]
pub fn project_slug(project_name: &str) -> String {
    project_name.replace(' ', "_").to_lowercase()
}

/// Per-project metadata record, persisted as `project_info.json` next to the
/// document folders. Field names are part of the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    pub project_id: String,
    pub project_name: String,
    pub document_folders: Vec<String>,
}

impl ProjectInfo {
    /// Build the record for a new project with the fixed folder set.
    #[must_use]
    pub fn new(project_name: &str) -> Self {
        Self {
            project_id: project_slug(project_name),
            project_name: project_name.to_string(),
            document_folders: DOCUMENT_FOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
