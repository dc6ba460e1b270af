//! # Error Types
//!
//! Domain-specific error types for importa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  importa-core errors (this file)                                        │
//! │  ├── CoreError        - Boundary/domain errors                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  importa-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  importa-rates errors (separate crate)                                  │
//! │  └── RateError        - Quote fetch/decode failures                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Errors Do NOT Occur
//! The pipelines themselves ([`crate::landed`], [`crate::purchase`]) never
//! return errors: degenerate inputs (zero units, zero packs, zero rate,
//! zero monthly sales) degrade to `0` or `None` by policy. Errors exist
//! only at the boundaries: form validation and CSV parsing.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Boundary errors for the costing core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A CSV snapshot could not be parsed back into a calculation.
    ///
    /// ## When This Occurs
    /// - Row does not have exactly two columns
    /// - A required field is missing
    /// - A numeric value fails to parse
    #[error("Malformed snapshot row: {0}")]
    MalformedSnapshot(String),

    /// Underlying CSV reader/writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before a batch is persisted; the pipelines
/// themselves accept any coerced input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be at least one.
    #[error("{field} must be at least 1")]
    MustBeAtLeastOne { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MalformedSnapshot("line 3".to_string());
        assert_eq!(err.to_string(), "Malformed snapshot row: line 3");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBeAtLeastOne {
            field: "units_per_pack".to_string(),
        };
        assert_eq!(err.to_string(), "units_per_pack must be at least 1");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
