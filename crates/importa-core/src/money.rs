//! # Money Module
//!
//! Rate normalization and display rounding for the costing pipelines.
//!
//! ## Why f64 And Not Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE PRECISION CONTRACT                                                 │
//! │                                                                         │
//! │  The landed-cost cascade chains fifteen multiplications and divisions  │
//! │  (per-unit costs over arbitrary unit counts, fractional tax rates).    │
//! │  Rounding at every step compounds: the final suggested price can       │
//! │  drift by whole cents from the reference figures.                      │
//! │                                                                         │
//! │  OUR RULE: full f64 precision inside the pipeline, rounding ONLY at    │
//! │  the display boundary (round_to_cents / format_usd). Persisted         │
//! │  snapshots keep the unrounded values.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The One Rate Convention
//! Calculator forms mix two unit systems: some fields arrive as fractions
//! (`0.21` = 21%) and some as percentage points (`1` = 1%). Here every
//! rate is a [`Rate`] holding a **fraction**; the only place a division
//! by 100 happens is [`Rate::from_percent`], called at the form boundary
//! for fields labeled in percent.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Rate Type
// =============================================================================

/// A tax/insurance/markup rate stored as a fraction (0.21 = 21%).
///
/// ## Design Decisions
/// - **f64 fraction**: the pipelines multiply rates against f64 bases, so
///   the fraction is the working representation
/// - **Single field tuple struct**: zero-cost abstraction over f64
/// - **Two constructors**: [`Rate::from_fraction`] for already-divided
///   inputs, [`Rate::from_percent`] for percent-point form fields
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(f64);

impl Rate {
    /// Creates a rate from a fraction (0.21 = 21%).
    ///
    /// ## Example
    /// ```rust
    /// use importa_core::money::Rate;
    ///
    /// let vat = Rate::from_fraction(0.21);
    /// assert_eq!(vat.fraction(), 0.21);
    /// ```
    #[inline]
    pub const fn from_fraction(fraction: f64) -> Self {
        Rate(fraction)
    }

    /// Creates a rate from percentage points (1.0 = 1%).
    ///
    /// This is the ONLY place in the crate where a percent value is divided
    /// by 100. Form fields labeled "(%)" must come through here.
    ///
    /// ## Example
    /// ```rust
    /// use importa_core::money::Rate;
    ///
    /// let insurance = Rate::from_percent(1.0);
    /// assert_eq!(insurance.fraction(), 0.01);
    /// ```
    #[inline]
    pub fn from_percent(percent: f64) -> Self {
        Rate(percent / 100.0)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Returns the rate as percentage points (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Applies the rate to a base amount.
    ///
    /// ## Example
    /// ```rust
    /// use importa_core::money::Rate;
    ///
    /// let vat = Rate::from_fraction(0.21);
    /// assert_eq!(vat.apply(100.0), 21.0);
    /// ```
    #[inline]
    pub fn apply(&self, base: f64) -> f64 {
        base * self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0.0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// =============================================================================
// Display Rounding
// =============================================================================

/// Rounds a monetary amount to 2 decimal places for display.
///
/// The pipelines never call this internally; callers round only when
/// presenting or comparing display figures.
///
/// ## Example
/// ```rust
/// use importa_core::money::round_to_cents;
///
/// assert_eq!(round_to_cents(3219.1929), 3219.19);
/// assert_eq!(round_to_cents(2492.6000000000004), 2492.6);
/// ```
#[inline]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats a USD amount for logs and debugging.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
///
/// ## Example
/// ```rust
/// use importa_core::money::format_usd;
///
/// assert_eq!(format_usd(10.99), "$10.99");
/// assert_eq!(format_usd(0.0), "$0.00");
/// assert_eq!(format_usd(-5.5), "-$5.50");
/// ```
pub fn format_usd(amount: f64) -> String {
    let rounded = round_to_cents(amount);
    if rounded < 0.0 {
        format!("-${:.2}", -rounded)
    } else {
        format!("${:.2}", rounded)
    }
}

/// Formats the credit-absorption horizon.
///
/// `None` means "cannot estimate" and renders as an em dash, matching the
/// calculator UI. It is never rendered as 0 or infinity.
pub fn format_months(months: Option<u32>) -> String {
    match months {
        Some(m) => format!("{m}"),
        None => "—".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_fraction() {
        let rate = Rate::from_fraction(0.21);
        assert_eq!(rate.fraction(), 0.21);
        assert!((rate.percent() - 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_rate_from_percent() {
        let rate = Rate::from_percent(1.0);
        assert_eq!(rate.fraction(), 0.01);
    }

    #[test]
    fn test_rate_apply() {
        let rate = Rate::from_fraction(0.2);
        assert!((rate.apply(12463.0) - 2492.6).abs() < 1e-9);
        assert_eq!(Rate::zero().apply(12463.0), 0.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(12.344), 12.34);
        assert_eq!(round_to_cents(12.345000001), 12.35);
        assert_eq!(round_to_cents(0.0), 0.0);
        assert_eq!(round_to_cents(-1.005000001), -1.01);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(10.99), "$10.99");
        assert_eq!(format_usd(5.0), "$5.00");
        assert_eq!(format_usd(-5.5), "-$5.50");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn test_format_months_sentinel() {
        assert_eq!(format_months(Some(2)), "2");
        assert_eq!(format_months(None), "—");
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(format!("{}", Rate::from_fraction(0.21)), "21%");
    }
}
