//! Error handling module for bdcalc
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Calculation failures are always local and recoverable: the user fixes the
//! form and presses Enter again.

use thiserror::Error;

/// Main error type for bdcalc
#[derive(Error, Debug)]
pub enum CalcError {
    /// User-correctable input problem (shown inline, aborts this action only)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Formula denominator evaluated to zero
    #[error("Division by zero: {0}")]
    DivideByZero(String),

    /// A dependent stage ran before its prerequisite completed
    #[error("{0}")]
    NotReady(String),

    /// Configuration values that fail validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors (report export, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, CalcError>;

impl CalcError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a divide-by-zero error
    pub fn divide_by_zero(msg: impl Into<String>) -> Self {
        Self::DivideByZero(msg.into())
    }

    /// Create a not-ready error
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether resubmitting the form can clear this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::DivideByZero(_) | Self::NotReady(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::invalid_input("Either Bonus or Payments must be greater than zero.");
        assert_eq!(
            err.to_string(),
            "Invalid input: Either Bonus or Payments must be greater than zero."
        );

        let err = CalcError::not_ready("Please complete the ROI calculation first.");
        assert_eq!(err.to_string(), "Please complete the ROI calculation first.");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CalcError = io_err.into();
        assert!(matches!(err, CalcError::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_calculation_errors_are_recoverable() {
        assert!(CalcError::invalid_input("x").is_recoverable());
        assert!(CalcError::divide_by_zero("x").is_recoverable());
        assert!(CalcError::not_ready("x").is_recoverable());
        assert!(!CalcError::config("x").is_recoverable());
    }
}
