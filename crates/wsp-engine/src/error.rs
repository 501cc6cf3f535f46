//! Error types for engine operations.

use thiserror::Error;
use wsp_core::WspError;

/// Errors raised before a calculation pass begins.
///
/// Missing catalog entries during a pass are not errors; they degrade to
/// zero velocity and loss.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] WspError),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for WspError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidSettings(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::InvalidSettings(WspError::OutOfRange {
            what: "max velocity",
            value: 0.0,
            reason: "must be > 0",
        });
        assert!(err.to_string().contains("max velocity"));
    }

    #[test]
    fn error_conversion() {
        let inner = WspError::NonFinite {
            what: "Hazen-Williams C",
            value: f64::NAN,
        };
        let core: WspError = EngineError::from(inner).into();
        assert!(matches!(core, WspError::NonFinite { what: "Hazen-Williams C", .. }));
    }
}
