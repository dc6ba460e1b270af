//! # Validation Module
//!
//! Form-boundary coercion and validation for Importa.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Boundary Layers                                    │
//! │                                                                         │
//! │  Layer 1: Storefront form (TypeScript)                                 │
//! │  ├── Basic format checks, immediate feedback                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Numeric coercion: malformed text → 0, NEVER NaN                   │
//! │  └── Business rule validation before persistence                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: The pipelines                                                │
//! │  └── Accept any coerced input; degenerate values degrade to 0/None     │
//! │                                                                         │
//! │  The pipelines NEVER see raw form text, so they never see NaN.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_BATCH_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a monetary/volume form field to f64.
///
/// ## Policy
/// - Empty or malformed text → `0.0`
/// - Negative values → `0.0` (every pipeline quantity is declared ≥ 0)
/// - NaN/Infinity can never leave this function
///
/// ## Example
/// ```rust
/// use importa_core::validation::coerce_amount;
///
/// assert_eq!(coerce_amount("51.5"), 51.5);
/// assert_eq!(coerce_amount("  51.5  "), 51.5);
/// assert_eq!(coerce_amount(""), 0.0);
/// assert_eq!(coerce_amount("abc"), 0.0);
/// assert_eq!(coerce_amount("-3"), 0.0);
/// ```
pub fn coerce_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Coerces an integer count form field to u32, same policy as
/// [`coerce_amount`].
///
/// ## Example
/// ```rust
/// use importa_core::validation::coerce_count;
///
/// assert_eq!(coerce_count("12"), 12);
/// assert_eq!(coerce_count(""), 0);
/// assert_eq!(coerce_count("-4"), 0);
/// ```
pub fn coerce_count(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(0)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a purchase batch name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most [`MAX_BATCH_NAME_LEN`] characters
pub fn validate_batch_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_BATCH_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_BATCH_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates units-per-pack before a batch is persisted.
///
/// ## Rules
/// - Must be at least 1 (a pack of zero units makes every per-unit figure
///   meaningless)
pub fn validate_units_per_pack(units: u32) -> ValidationResult<()> {
    if units < 1 {
        return Err(ValidationError::MustBeAtLeastOne {
            field: "units_per_pack".to_string(),
        });
    }

    Ok(())
}

/// Validates a rate fraction.
///
/// ## Rules
/// - Must be between 0.0 and 1.0 (a 100% levy is the sanity ceiling for
///   every rate field in the calculator)
pub fn validate_rate_fraction(field: &str, fraction: f64) -> ValidationResult<()> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Ok(())
}

/// Validates a markup multiplier.
///
/// ## Rules
/// - Must not be negative (a zero multiplier is allowed: it just produces
///   a zero suggested price)
pub fn validate_multiplier(multiplier: f64) -> ValidationResult<()> {
    if multiplier < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "multiplier".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("51.5"), 51.5);
        assert_eq!(coerce_amount(" 0.21 "), 0.21);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("   "), 0.0);
        assert_eq!(coerce_amount("12,5"), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("-3.5"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount("inf"), 0.0);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("12"), 12);
        assert_eq!(coerce_count(" 200 "), 200);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("-4"), 0);
        assert_eq!(coerce_count("3.5"), 0);
    }

    #[test]
    fn test_validate_batch_name() {
        assert!(validate_batch_name("Thermos 1L").is_ok());
        assert!(validate_batch_name("").is_err());
        assert!(validate_batch_name("   ").is_err());
        assert!(validate_batch_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_units_per_pack() {
        assert!(validate_units_per_pack(1).is_ok());
        assert!(validate_units_per_pack(12).is_ok());
        assert!(validate_units_per_pack(0).is_err());
    }

    #[test]
    fn test_validate_rate_fraction() {
        assert!(validate_rate_fraction("vat", 0.0).is_ok());
        assert!(validate_rate_fraction("vat", 0.21).is_ok());
        assert!(validate_rate_fraction("vat", 1.0).is_ok());
        assert!(validate_rate_fraction("vat", 1.01).is_err());
        assert!(validate_rate_fraction("vat", -0.1).is_err());
    }

    #[test]
    fn test_validate_multiplier() {
        assert!(validate_multiplier(0.0).is_ok());
        assert!(validate_multiplier(2.5).is_ok());
        assert!(validate_multiplier(-1.0).is_err());
    }
}
