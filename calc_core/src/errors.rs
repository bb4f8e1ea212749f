//! # Error Types
//!
//! Structured error types for calc_core. Every calculator reports the first
//! failing field or condition it finds, so a single error value always maps
//! to a single message on screen.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_principal(principal: f64) -> CalcResult<()> {
//!     if principal < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "principal",
//!             principal.to_string(),
//!             "Principal cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_principal(-5.0).unwrap_err();
//! assert_eq!(err.user_message(), "Principal cannot be negative");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (not a number, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Unit key is not part of the converter's unit set
    #[error("Unknown {quantity} unit: {unit}")]
    UnknownUnit { quantity: String, unit: String },

    /// Result is physically impossible (e.g. below absolute zero)
    #[error("Out of physical range: {reason}")]
    OutOfPhysicalRange { reason: String },

    /// No usable data points were supplied
    #[error("No data: {reason}")]
    NoData { reason: String },

    /// No calculator is registered for this route
    #[error("Calculator not found: {category}/{calculator}")]
    CalculatorNotFound {
        category: String,
        calculator: String,
    },

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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    /// Create an OutOfPhysicalRange error
    pub fn out_of_physical_range(reason: impl Into<String>) -> Self {
        CalcError::OutOfPhysicalRange {
            reason: reason.into(),
        }
    }

    /// Create a NoData error
    pub fn no_data(reason: impl Into<String>) -> Self {
        CalcError::NoData {
            reason: reason.into(),
        }
    }

    /// Create a CalculatorNotFound error
    pub fn calculator_not_found(category: impl Into<String>, calculator: impl Into<String>) -> Self {
        CalcError::CalculatorNotFound {
            category: category.into(),
            calculator: calculator.into(),
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

    /// The field this error is attributed to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Message shown to the user in place of the result card.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::InvalidInput { reason, .. } => reason.clone(),
            CalcError::MissingField { field } => format!("Please enter a value for {}", field),
            CalcError::UnknownUnit { quantity, unit } => {
                format!("'{}' is not a supported {} unit", unit, quantity)
            }
            CalcError::OutOfPhysicalRange { reason } => reason.clone(),
            CalcError::NoData { reason } => reason.clone(),
            CalcError::CalculatorNotFound { category, calculator } => {
                format!("No calculator at {}/{}", category, calculator)
            }
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::OutOfPhysicalRange { .. } => "OUT_OF_PHYSICAL_RANGE",
            CalcError::NoData { .. } => "NO_DATA",
            CalcError::CalculatorNotFound { .. } => "CALCULATOR_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
