//! wsp-project: persisted project format, migration, validation and record
//! editing.

pub mod edit;
pub mod migrate;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use edit::{
    ROOT_ID, add_node, delete_node, insert_node_before, new_project, renumber_branches,
    set_manual_critical,
};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

use migrate::ProjectFile;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Edit error: {what}")]
    Edit { what: String },

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn finish_load(file: ProjectFile) -> ProjectResult<Project> {
    let project = migrate_to_latest(file.into())?;
    validate_project(&project)?;
    Ok(project)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    finish_load(ProjectFile::from_yaml(&content)?)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    finish_load(ProjectFile::from_json(&content)?)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            Ok(Format::Yaml)
        }
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load JSON or YAML by file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    match format_of(path)? {
        Format::Json => load_json(path),
        Format::Yaml => load_yaml(path),
    }
}

/// Save JSON or YAML by file extension.
pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    match format_of(path)? {
        Format::Json => save_json(path, project),
        Format::Yaml => save_yaml(path, project),
    }
}
