use thiserror::Error;

/// Errors raised while validating inputs or computing indicators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// The series or a parameter cannot be used (missing `close`, window < 1,
    /// unsupported moving-average type, ...).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// An indicator column does not line up with the base series.
    #[error("Length mismatch for '{name}': expected {expected} values, got {actual}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl IndicatorError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndicatorError>;

/// Reject windows below `min`.
pub(crate) fn ensure_window(indicator: &str, param: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(IndicatorError::invalid(format!(
            "{indicator} requires {param} >= {min}, got {value}"
        )));
    }
    Ok(())
}
