//! Project loading, saving, validation, and introspection.

use std::path::Path;
use wsp_network::NodeKind;
use wsp_project::Project;

use crate::error::{AppError, AppResult};

/// Counts shown when listing a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub name: String,
    pub version: u32,
    pub branch_count: usize,
    pub system_count: usize,
    pub fixture_count: usize,
    pub fixture_specs: usize,
}

/// Load a JSON or YAML project, migrating older formats.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = wsp_project::load(path).map_err(|source| AppError::ProjectLoad {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = project.pipes.len(), "loaded project");
    Ok(project)
}

/// Save a project; the format follows the file extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    wsp_project::save(path, project).map_err(|source| AppError::ProjectSave {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved project");
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    wsp_project::validate_project(project)?;
    if project.pipes.is_empty() {
        return Err(AppError::InvalidInput(
            "Project must have at least one pipe record".to_string(),
        ));
    }
    Ok(())
}

pub fn summarize(project: &Project) -> ProjectSummary {
    let count = |kind| project.pipes.iter().filter(|p| p.kind == kind).count();
    ProjectSummary {
        name: project.name.clone(),
        version: project.version,
        branch_count: count(NodeKind::Branch),
        system_count: count(NodeKind::System),
        fixture_count: count(NodeKind::Fixture),
        fixture_specs: project.fixture_catalog().len(),
    }
}
