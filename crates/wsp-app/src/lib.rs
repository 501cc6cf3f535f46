//! Shared application service layer for water-supply pipe sizing.
//!
//! Front ends go through here for project management, compiling records
//! into a calculation tree and running a full calculation pass.

pub mod calc_service;
pub mod compile;
pub mod error;
pub mod project_service;

pub use calc_service::{CalcOptions, CalculationOutcome, run_calculation};
pub use compile::compile_tree;
pub use error::{AppError, AppResult};
pub use project_service::{ProjectSummary, load_project, save_project, summarize, validate_project};
