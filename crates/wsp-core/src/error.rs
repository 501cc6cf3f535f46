use thiserror::Error;

pub type WspResult<T> = Result<T, WspError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WspError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value} ({reason})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
