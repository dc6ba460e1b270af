//! # Landed-Cost Pipeline
//!
//! Maps an [`ImportCalculationInput`] to an [`ImportCostBreakdown`]
//! deterministically. Pure function: no I/O, no exceptions, full f64
//! precision end to end.
//!
//! ## The Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Landed-Cost Cascade                                │
//! │                                                                         │
//! │  quantity × unit price ──► FOB                                         │
//! │  m³ × freight rate     ──► freight                                     │
//! │  FOB × insurance rate  ──► insurance                                   │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                            CIF ──► duty, stat tax                      │
//! │                             │                                           │
//! │                             ▼                                           │
//! │        tax base = valor criterio (if set) ─ OR ─ CIF+duty+stat        │
//! │                             │                                           │
//! │                             ▼                                           │
//! │   VAT, withholdings, dumping (all on the tax base)                     │
//! │                             │                                           │
//! │                             ▼                                           │
//! │   total landed cost ──► fiscal credit split ──► per-unit costs         │
//! │                             │                                           │
//! │                             ▼                                           │
//! │   suggested price ──► monthly output VAT ──► absorption horizon        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step is built only from previously computed values, so the whole
//! breakdown is recomputed from scratch on every input change. There is
//! no incremental state to get out of sync.

use crate::types::{ImportCalculationInput, ImportCostBreakdown};

/// Computes the full landed-cost breakdown for an import.
///
/// ## Degenerate Inputs
/// Zero quantities, units, rates, or sales volumes are all legal:
/// - `units == 0` falls back to the unit-count-insensitive totals
/// - `units_sold_per_month == 0` (or zero VAT) yields
///   `credit_absorption_months = None`, never 0, infinity, or NaN
///
/// ## Tax Base Substitution
/// When a customs reference value ("valor criterio") is present and
/// positive, it fully REPLACES the computed CIF + duty + stat-tax base for
/// every downstream tax line. It is never added on top.
///
/// ## Example
/// ```rust
/// use importa_core::landed;
/// use importa_core::money::Rate;
/// use importa_core::types::ImportCalculationInput;
///
/// let input = ImportCalculationInput {
///     quantity: 200,
///     unit_price_usd: 51.5,
///     cubic_meters: 5.15,
///     freight_per_cubic_meter: 400.0,
///     insurance: Rate::from_percent(1.0),
///     duty: Rate::from_fraction(0.2),
///     stat_tax: Rate::from_fraction(0.03),
///     vat: Rate::from_fraction(0.21),
///     ..ImportCalculationInput::default()
/// };
///
/// let b = landed::calculate(&input);
/// assert_eq!(b.fob, 10300.0);
/// assert!((b.vat - 3219.19).abs() < 0.01);
/// ```
pub fn calculate(input: &ImportCalculationInput) -> ImportCostBreakdown {
    // Steps 1-4: goods value up to CIF.
    let fob = input.quantity as f64 * input.unit_price_usd;
    let freight = input.cubic_meters * input.freight_per_cubic_meter;
    let insurance = input.insurance.apply(fob);
    let cif = fob + freight + insurance;

    // Steps 5-6: CIF-based levies.
    let duty = input.duty.apply(cif);
    let stat_tax = input.stat_tax.apply(cif);

    // Step 7: tax base, with valor criterio substitution.
    let naive_base = cif + duty + stat_tax;
    let tax_base = match input.customs_value_override {
        Some(v) if v > 0.0 => v,
        _ => naive_base,
    };

    // Step 8: tax-base levies.
    let vat = input.vat.apply(tax_base);
    let vat_withholding = input.vat_withholding.apply(tax_base);
    let income_tax_withholding = input.income_tax_withholding.apply(tax_base);
    let gross_receipts_withholding = input.gross_receipts_withholding.apply(tax_base);
    let dumping = input.dumping.apply(tax_base);

    // Step 9: total landed cost.
    let extras = input.digitization
        + input.operating_expenses
        + input.fees
        + input.certifications
        + input.extra_taxes;
    let total = fob
        + freight
        + insurance
        + duty
        + stat_tax
        + vat
        + vat_withholding
        + income_tax_withholding
        + gross_receipts_withholding
        + input.digitization
        + input.operating_expenses
        + input.fees
        + input.certifications
        + dumping
        + input.extra_taxes;

    // Steps 10-11: fiscal credit split. Gross-receipts withholding and
    // dumping are never creditable.
    let credit_eligible_amount = vat + vat_withholding + income_tax_withholding;
    let net_cost_registered_taxpayer = total - credit_eligible_amount;
    let net_cost_flat_taxpayer = total;

    // Step 12: per-unit costs, unit-count-insensitive when units == 0.
    let (unit_cost_registered, unit_cost_flat) = if input.units > 0 {
        let units = input.units as f64;
        (
            net_cost_registered_taxpayer / units,
            net_cost_flat_taxpayer / units,
        )
    } else {
        (net_cost_registered_taxpayer, net_cost_flat_taxpayer)
    };

    // Steps 13-15: suggested price and projected output VAT.
    let suggested_price_ex_vat = match input.manual_sale_price {
        Some(p) if p > 0.0 => p,
        _ => unit_cost_registered * input.multiplier,
    };
    let suggested_price_with_vat = suggested_price_ex_vat * (1.0 + input.vat.fraction());
    let monthly_vat_output =
        input.vat.apply(suggested_price_ex_vat) * input.units_sold_per_month;

    // Step 16: credit absorption horizon. Exact divisions must not round
    // up an extra month.
    let credit_absorption_months = if monthly_vat_output > 0.0 {
        Some((credit_eligible_amount / monthly_vat_output).ceil() as u32)
    } else {
        None
    };

    ImportCostBreakdown {
        fob,
        freight,
        insurance,
        cif,
        duty,
        stat_tax,
        tax_base,
        vat,
        vat_withholding,
        income_tax_withholding,
        gross_receipts_withholding,
        dumping,
        extras,
        total,
        credit_eligible_amount,
        net_cost_registered_taxpayer,
        net_cost_flat_taxpayer,
        unit_cost_registered,
        unit_cost_flat,
        suggested_price_ex_vat,
        suggested_price_with_vat,
        monthly_vat_output,
        credit_absorption_months,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;

    const EPS: f64 = 1e-9;

    /// A typical mixed container with known reference figures.
    fn reference_input() -> ImportCalculationInput {
        ImportCalculationInput {
            quantity: 200,
            unit_price_usd: 51.5,
            cubic_meters: 5.15,
            freight_per_cubic_meter: 400.0,
            insurance: Rate::from_percent(1.0),
            duty: Rate::from_fraction(0.2),
            stat_tax: Rate::from_fraction(0.03),
            vat: Rate::from_fraction(0.21),
            ..ImportCalculationInput::default()
        }
    }

    #[test]
    fn test_reference_container_end_to_end() {
        let b = calculate(&reference_input());

        assert!((b.fob - 10300.0).abs() < EPS);
        assert!((b.freight - 2060.0).abs() < EPS);
        assert!((b.insurance - 103.0).abs() < EPS);
        assert!((b.cif - 12463.0).abs() < EPS);
        assert!((b.duty - 2492.6).abs() < 0.01);
        assert!((b.stat_tax - 373.89).abs() < 0.01);
        assert!((b.tax_base - 15329.49).abs() < 0.01);
        assert!((b.vat - 3219.19).abs() < 0.01);
    }

    #[test]
    fn test_cif_is_exactly_fob_plus_freight_plus_insurance() {
        let b = calculate(&reference_input());
        assert_eq!(b.cif, b.fob + b.freight + b.insurance);
    }

    #[test]
    fn test_customs_value_override_substitutes_the_base() {
        let mut input = reference_input();
        // Override BELOW the naive base: substitution must still win.
        input.customs_value_override = Some(10000.0);

        let b = calculate(&input);
        assert_eq!(b.tax_base, 10000.0);
        assert!((b.vat - 2100.0).abs() < EPS);

        // Zero or absent override falls back to the computed base.
        input.customs_value_override = Some(0.0);
        let b = calculate(&input);
        assert!((b.tax_base - 15329.49).abs() < 0.01);
    }

    #[test]
    fn test_credit_never_includes_gross_receipts_or_dumping() {
        let base = reference_input();

        let mut loaded = base.clone();
        loaded.gross_receipts_withholding = Rate::from_fraction(0.025);
        loaded.dumping = Rate::from_fraction(0.5);

        let b0 = calculate(&base);
        let b1 = calculate(&loaded);
        assert_eq!(b0.credit_eligible_amount, b1.credit_eligible_amount);
        // But the total does grow.
        assert!(b1.total > b0.total);
    }

    #[test]
    fn test_taxpayer_regime_split() {
        let mut input = reference_input();
        input.vat_withholding = Rate::from_fraction(0.2);
        input.income_tax_withholding = Rate::from_fraction(0.06);

        let b = calculate(&input);
        assert_eq!(b.net_cost_flat_taxpayer, b.total);
        assert!(
            (b.net_cost_registered_taxpayer - (b.total - b.credit_eligible_amount)).abs() < EPS
        );
        assert!(
            (b.credit_eligible_amount - (b.vat + b.vat_withholding + b.income_tax_withholding))
                .abs()
                < EPS
        );
    }

    #[test]
    fn test_zero_units_falls_back_to_totals() {
        let input = reference_input(); // units == 0
        let b = calculate(&input);
        assert_eq!(b.unit_cost_registered, b.net_cost_registered_taxpayer);
        assert_eq!(b.unit_cost_flat, b.net_cost_flat_taxpayer);

        let mut divided = reference_input();
        divided.units = 200;
        let b = calculate(&divided);
        assert!((b.unit_cost_registered - b.net_cost_registered_taxpayer / 200.0).abs() < EPS);
    }

    #[test]
    fn test_manual_sale_price_overrides_markup() {
        let mut input = reference_input();
        input.units = 200;
        input.multiplier = 2.5;

        let b = calculate(&input);
        assert!((b.suggested_price_ex_vat - b.unit_cost_registered * 2.5).abs() < EPS);

        input.manual_sale_price = Some(199.99);
        let b = calculate(&input);
        assert_eq!(b.suggested_price_ex_vat, 199.99);
        assert!((b.suggested_price_with_vat - 199.99 * 1.21).abs() < EPS);

        // A zero override is "no override".
        input.manual_sale_price = Some(0.0);
        let b = calculate(&input);
        assert!((b.suggested_price_ex_vat - b.unit_cost_registered * 2.5).abs() < EPS);
    }

    #[test]
    fn test_absorption_horizon_is_none_without_monthly_output() {
        // No projected sales: cannot estimate.
        let b = calculate(&reference_input());
        assert_eq!(b.monthly_vat_output, 0.0);
        assert_eq!(b.credit_absorption_months, None);

        // Zero VAT rate also means no output VAT to absorb against.
        let mut input = reference_input();
        input.vat = Rate::zero();
        input.units_sold_per_month = 100.0;
        let b = calculate(&input);
        assert_eq!(b.credit_absorption_months, None);
    }

    #[test]
    fn test_absorption_horizon_exact_division_does_not_round_up() {
        // Build an input where credit = 100 and monthly output = 50 exactly:
        // manual price 100, VAT 10% → 10 of output VAT per unit, 5 units/mo.
        let input = ImportCalculationInput {
            quantity: 1,
            unit_price_usd: 1000.0,
            vat: Rate::from_fraction(0.1),
            manual_sale_price: Some(100.0),
            units_sold_per_month: 5.0,
            ..ImportCalculationInput::default()
        };

        let b = calculate(&input);
        assert!((b.credit_eligible_amount - 100.0).abs() < EPS);
        assert!((b.monthly_vat_output - 50.0).abs() < EPS);
        // 100 / 50 = exactly 2 months, not 3.
        assert_eq!(b.credit_absorption_months, Some(2));
    }

    #[test]
    fn test_absorption_horizon_partial_month_rounds_up() {
        let input = ImportCalculationInput {
            quantity: 1,
            unit_price_usd: 1100.0, // credit = 110
            vat: Rate::from_fraction(0.1),
            manual_sale_price: Some(100.0),
            units_sold_per_month: 5.0, // monthly output = 50
            ..ImportCalculationInput::default()
        };

        let b = calculate(&input);
        // 110 / 50 = 2.2 → 3 months.
        assert_eq!(b.credit_absorption_months, Some(3));
    }

    #[test]
    fn test_all_zero_input_produces_all_zero_output() {
        let b = calculate(&ImportCalculationInput::default());
        assert_eq!(b.total, 0.0);
        assert_eq!(b.unit_cost_registered, 0.0);
        assert_eq!(b.suggested_price_with_vat, 0.0);
        assert_eq!(b.credit_absorption_months, None);
        // The policy is 0 or None, never NaN.
        assert!(!b.total.is_nan());
        assert!(!b.unit_cost_flat.is_nan());
    }

    #[test]
    fn test_total_includes_fixed_surcharges_and_extras_sums_them() {
        let mut input = reference_input();
        input.digitization = 10.0;
        input.operating_expenses = 20.0;
        input.fees = 30.0;
        input.certifications = 40.0;
        input.extra_taxes = 50.0;

        let plain = calculate(&reference_input());
        let b = calculate(&input);
        assert!((b.extras - 150.0).abs() < EPS);
        assert!((b.total - (plain.total + 150.0)).abs() < EPS);
    }
}
