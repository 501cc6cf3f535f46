//! Schema migration framework.
//!
//! Version history:
//! - 0: a bare array of pipe records
//! - 2: `{ version, pipes, fixture_specs }` without settings or name
//! - 3: adds `name` and `settings`
//!
//! Version 1 never shipped; it migrates like 0.

use wsp_catalog::{FixtureCatalog, material_code};

use crate::ProjectError;
use crate::schema::{PipeRecord, Project};

pub const LATEST_VERSION: u32 = 3;

/// Anything a project file may contain at its top level.
///
/// The shape is decided from the top-level value before the typed parse, so
/// a malformed document reports its own error.
pub(crate) enum ProjectFile {
    Document(Project),
    Records(Vec<PipeRecord>),
}

impl ProjectFile {
    pub(crate) fn from_json(content: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.is_array() {
            serde_json::from_value(value).map(ProjectFile::Records)
        } else {
            serde_json::from_value(value).map(ProjectFile::Document)
        }
    }

    pub(crate) fn from_yaml(content: &str) -> serde_yaml::Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_sequence() {
            serde_yaml::from_value(value).map(ProjectFile::Records)
        } else {
            serde_yaml::from_value(value).map(ProjectFile::Document)
        }
    }
}

impl From<ProjectFile> for Project {
    fn from(file: ProjectFile) -> Self {
        match file {
            ProjectFile::Document(project) => project,
            ProjectFile::Records(pipes) => Project {
                version: 0,
                name: String::new(),
                pipes,
                fixture_specs: FixtureCatalog::new(),
                settings: Default::default(),
            },
        }
    }
}

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        let from = project.version;
        project = migrate_one_version(project)?;
        tracing::info!(from, to = project.version, "migrated project");
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 | 1 => migrate_records_to_v2(project),
        2 => migrate_v2_to_v3(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_records_to_v2(mut project: Project) -> Result<Project, ProjectError> {
    if project.fixture_specs.is_empty() {
        project.fixture_specs = FixtureCatalog::builtin();
    }
    project.version = 2;
    Ok(project)
}

fn migrate_v2_to_v3(mut project: Project) -> Result<Project, ProjectError> {
    if project.fixture_specs.is_empty() {
        project.fixture_specs = FixtureCatalog::builtin();
    }
    // Older files name materials "<code> (<description>)".
    for record in &mut project.pipes {
        if let Some(name) = record.specific_pipe_type.as_mut() {
            *name = material_code(name).to_string();
        }
    }
    if project.name.trim().is_empty() {
        project.name = "Untitled".to_string();
    }
    project.version = 3;
    Ok(project)
}
