//! # Error Types
//!
//! Structured error types for calc_core. Every calculator reports failures
//! through [`CalcError`] so a presentation layer can show an inline message
//! next to the offending field and clear the previous result.
//!
//! Errors fall into two groups:
//!
//! - **Parse errors** ([`CalcError::InvalidNumber`], [`CalcError::MissingField`]):
//!   the text could not be read as the expected kind of value.
//! - **Domain errors** ([`CalcError::InvalidInput`], [`CalcError::UnknownUnit`]):
//!   the value was read but is outside what the calculation accepts.
//!
//! Empty input is never an error. Calculators return `Ok(None)` or a
//! neutral result for it.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_weight(weight_kg: f64) -> CalcResult<()> {
//!     if weight_kg <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "weight_kg",
//!             weight_kg.to_string(),
//!             "Weight must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_weight(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside the accepted domain (negative length, zero period, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A token could not be parsed as a number, date or digit string
    #[error("Invalid number in '{field}': '{token}'")]
    InvalidNumber { field: String, token: String },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Unit is not part of the selected conversion table
    #[error("Unknown unit '{unit}' for {dimension}")]
    UnknownUnit { unit: String, dimension: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(field: impl Into<String>, token: impl Into<String>) -> Self {
        CalcError::InvalidNumber {
            field: field.into(),
            token: token.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>, dimension: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            unit: unit.into(),
            dimension: dimension.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by unreadable text rather than out-of-range values
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CalcError::InvalidNumber { .. } | CalcError::MissingField { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidNumber { .. } => "INVALID_NUMBER",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

/// Parse an optional numeric field from user text.
///
/// Returns `Ok(None)` for empty or whitespace-only text.
pub fn parse_optional_f64(field: &str, text: &str) -> CalcResult<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(CalcError::invalid_number(field, trimmed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_number("values", "12a");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidNumber\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_unit("furlong", "length").error_code(), "UNKNOWN_UNIT");
        assert_eq!(CalcError::invalid_input("x", "-1", "neg").error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(CalcError::invalid_number("x", "abc").is_parse_error());
        assert!(!CalcError::invalid_input("x", "-1", "neg").is_parse_error());
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("x", "   ").unwrap(), None);
        assert_eq!(parse_optional_f64("x", " 2.5 ").unwrap(), Some(2.5));
        assert!(parse_optional_f64("x", "two").is_err());
        assert!(parse_optional_f64("x", "NaN").is_err());
    }

    #[test]
    fn test_display_names_token() {
        let msg = CalcError::invalid_number("values", "1,2x").to_string();
        assert!(msg.contains("'1,2x'"));
    }
}
