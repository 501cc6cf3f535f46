//! Error types for the wsp-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors for CLI and
/// other front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to load project {path}: {source}")]
    ProjectLoad {
        path: PathBuf,
        source: wsp_project::ProjectError,
    },

    #[error("Failed to save project {path}: {source}")]
    ProjectSave {
        path: PathBuf,
        source: wsp_project::ProjectError,
    },

    #[error("Project validation failed: {0}")]
    Validation(#[from] wsp_project::ValidationError),

    #[error("Network compilation failed: {0}")]
    Compile(#[from] wsp_network::NetworkError),

    #[error("Engine error: {0}")]
    Engine(#[from] wsp_engine::EngineError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
