//! Catalog errors.

use thiserror::Error;
use wsp_core::WspError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Fixture key without a recognised population suffix.
    #[error("Invalid fixture key '{key}': expected '<name> (公)' or '<name> (私)'")]
    InvalidFixtureKey { key: String },

    #[error("Duplicate material code: {code}")]
    DuplicateMaterial { code: String },

    #[error("Material '{code}' has an invalid size entry '{label}' ({reason})")]
    InvalidSize {
        code: String,
        label: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Core(#[from] WspError),
}
