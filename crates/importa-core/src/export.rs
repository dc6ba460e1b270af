//! # CSV Snapshot Export
//!
//! Flattens a full `{input, result}` calculation pair into `"field","value"`
//! rows and parses such rows back.
//!
//! ## Row Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One row per field, inputs first then outputs, every cell quoted       │
//! │  (embedded quotes doubled by the csv crate):                           │
//! │                                                                         │
//! │    "input.quantity","200"                                              │
//! │    "input.unit_price_usd","51.5"                                       │
//! │    ...                                                                  │
//! │    "result.fob","10300"                                                │
//! │    "result.cif","12463"                                                │
//! │    ...                                                                  │
//! │    "result.credit_absorption_months",""                                │
//! │                                                                         │
//! │  Optional fields serialize as the empty string when absent.            │
//! │  Values keep full f64 precision (shortest round-trip formatting).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `input.`/`result.` prefixes disambiguate fields that exist on both
//! sides (insurance, duty as rate vs. amount, and so on).

use std::collections::HashMap;
use std::io;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::error::{CoreError, CoreResult};
use crate::money::Rate;
use crate::types::{ImportCalculationInput, ImportCostBreakdown};

// =============================================================================
// Flattening
// =============================================================================

fn fmt_f64(value: f64) -> String {
    // Rust's shortest round-trip formatting: parse() recovers the exact bits.
    format!("{value}")
}

fn fmt_opt_f64(value: Option<f64>) -> String {
    value.map(fmt_f64).unwrap_or_default()
}

/// Flattens a calculation into `(field, value)` rows, inputs first then
/// outputs, in pipeline order.
pub fn snapshot_rows(
    input: &ImportCalculationInput,
    result: &ImportCostBreakdown,
) -> Vec<(String, String)> {
    let rows: Vec<(&str, String)> = vec![
        ("input.quantity", input.quantity.to_string()),
        ("input.unit_price_usd", fmt_f64(input.unit_price_usd)),
        ("input.cubic_meters", fmt_f64(input.cubic_meters)),
        (
            "input.freight_per_cubic_meter",
            fmt_f64(input.freight_per_cubic_meter),
        ),
        ("input.insurance", fmt_f64(input.insurance.fraction())),
        ("input.duty", fmt_f64(input.duty.fraction())),
        ("input.stat_tax", fmt_f64(input.stat_tax.fraction())),
        ("input.vat", fmt_f64(input.vat.fraction())),
        (
            "input.vat_withholding",
            fmt_f64(input.vat_withholding.fraction()),
        ),
        (
            "input.income_tax_withholding",
            fmt_f64(input.income_tax_withholding.fraction()),
        ),
        (
            "input.gross_receipts_withholding",
            fmt_f64(input.gross_receipts_withholding.fraction()),
        ),
        ("input.dumping", fmt_f64(input.dumping.fraction())),
        ("input.digitization", fmt_f64(input.digitization)),
        ("input.operating_expenses", fmt_f64(input.operating_expenses)),
        ("input.fees", fmt_f64(input.fees)),
        ("input.certifications", fmt_f64(input.certifications)),
        ("input.extra_taxes", fmt_f64(input.extra_taxes)),
        ("input.units", input.units.to_string()),
        ("input.multiplier", fmt_f64(input.multiplier)),
        (
            "input.manual_sale_price",
            fmt_opt_f64(input.manual_sale_price),
        ),
        (
            "input.units_sold_per_month",
            fmt_f64(input.units_sold_per_month),
        ),
        (
            "input.customs_value_override",
            fmt_opt_f64(input.customs_value_override),
        ),
        ("result.fob", fmt_f64(result.fob)),
        ("result.freight", fmt_f64(result.freight)),
        ("result.insurance", fmt_f64(result.insurance)),
        ("result.cif", fmt_f64(result.cif)),
        ("result.duty", fmt_f64(result.duty)),
        ("result.stat_tax", fmt_f64(result.stat_tax)),
        ("result.tax_base", fmt_f64(result.tax_base)),
        ("result.vat", fmt_f64(result.vat)),
        ("result.vat_withholding", fmt_f64(result.vat_withholding)),
        (
            "result.income_tax_withholding",
            fmt_f64(result.income_tax_withholding),
        ),
        (
            "result.gross_receipts_withholding",
            fmt_f64(result.gross_receipts_withholding),
        ),
        ("result.dumping", fmt_f64(result.dumping)),
        ("result.extras", fmt_f64(result.extras)),
        ("result.total", fmt_f64(result.total)),
        (
            "result.credit_eligible_amount",
            fmt_f64(result.credit_eligible_amount),
        ),
        (
            "result.net_cost_registered_taxpayer",
            fmt_f64(result.net_cost_registered_taxpayer),
        ),
        (
            "result.net_cost_flat_taxpayer",
            fmt_f64(result.net_cost_flat_taxpayer),
        ),
        (
            "result.unit_cost_registered",
            fmt_f64(result.unit_cost_registered),
        ),
        ("result.unit_cost_flat", fmt_f64(result.unit_cost_flat)),
        (
            "result.suggested_price_ex_vat",
            fmt_f64(result.suggested_price_ex_vat),
        ),
        (
            "result.suggested_price_with_vat",
            fmt_f64(result.suggested_price_with_vat),
        ),
        (
            "result.monthly_vat_output",
            fmt_f64(result.monthly_vat_output),
        ),
        (
            "result.credit_absorption_months",
            result
                .credit_absorption_months
                .map(|m| m.to_string())
                .unwrap_or_default(),
        ),
    ];

    rows.into_iter()
        .map(|(field, value)| (field.to_string(), value))
        .collect()
}

/// Writes a calculation snapshot as CSV to any writer.
///
/// Every cell is quoted; embedded quotes are doubled per RFC 4180.
pub fn write_csv<W: io::Write>(
    writer: W,
    input: &ImportCalculationInput,
    result: &ImportCostBreakdown,
) -> CoreResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    for (field, value) in snapshot_rows(input, result) {
        csv_writer.write_record([field.as_str(), value.as_str()])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders a calculation snapshot as a CSV string.
pub fn to_csv_string(
    input: &ImportCalculationInput,
    result: &ImportCostBreakdown,
) -> CoreResult<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, input, result)?;
    String::from_utf8(buffer).map_err(|e| CoreError::MalformedSnapshot(e.to_string()))
}

// =============================================================================
// Parsing
// =============================================================================

/// Field → raw value map read back from a snapshot.
struct FieldMap(HashMap<String, String>);

impl FieldMap {
    fn raw(&self, field: &str) -> CoreResult<&str> {
        self.0
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| CoreError::MalformedSnapshot(format!("missing field {field}")))
    }

    fn f64(&self, field: &str) -> CoreResult<f64> {
        self.raw(field)?
            .parse()
            .map_err(|_| CoreError::MalformedSnapshot(format!("bad number in {field}")))
    }

    fn u32(&self, field: &str) -> CoreResult<u32> {
        self.raw(field)?
            .parse()
            .map_err(|_| CoreError::MalformedSnapshot(format!("bad count in {field}")))
    }

    fn rate(&self, field: &str) -> CoreResult<Rate> {
        Ok(Rate::from_fraction(self.f64(field)?))
    }

    fn opt_f64(&self, field: &str) -> CoreResult<Option<f64>> {
        match self.raw(field)? {
            "" => Ok(None),
            _ => Ok(Some(self.f64(field)?)),
        }
    }

    fn opt_u32(&self, field: &str) -> CoreResult<Option<u32>> {
        match self.raw(field)? {
            "" => Ok(None),
            _ => Ok(Some(self.u32(field)?)),
        }
    }
}

/// Parses a CSV snapshot back into the `{input, result}` pair.
///
/// Numeric fields round-trip exactly (shortest round-trip formatting), so a
/// re-export of the parsed pair is byte-identical to the original.
pub fn read_csv<R: io::Read>(
    reader: R,
) -> CoreResult<(ImportCalculationInput, ImportCostBreakdown)> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    let mut fields = HashMap::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.len() != 2 {
            return Err(CoreError::MalformedSnapshot(format!(
                "expected 2 columns, got {}",
                record.len()
            )));
        }
        fields.insert(record[0].to_string(), record[1].to_string());
    }
    let map = FieldMap(fields);

    let input = ImportCalculationInput {
        quantity: map.u32("input.quantity")?,
        unit_price_usd: map.f64("input.unit_price_usd")?,
        cubic_meters: map.f64("input.cubic_meters")?,
        freight_per_cubic_meter: map.f64("input.freight_per_cubic_meter")?,
        insurance: map.rate("input.insurance")?,
        duty: map.rate("input.duty")?,
        stat_tax: map.rate("input.stat_tax")?,
        vat: map.rate("input.vat")?,
        vat_withholding: map.rate("input.vat_withholding")?,
        income_tax_withholding: map.rate("input.income_tax_withholding")?,
        gross_receipts_withholding: map.rate("input.gross_receipts_withholding")?,
        dumping: map.rate("input.dumping")?,
        digitization: map.f64("input.digitization")?,
        operating_expenses: map.f64("input.operating_expenses")?,
        fees: map.f64("input.fees")?,
        certifications: map.f64("input.certifications")?,
        extra_taxes: map.f64("input.extra_taxes")?,
        units: map.u32("input.units")?,
        multiplier: map.f64("input.multiplier")?,
        manual_sale_price: map.opt_f64("input.manual_sale_price")?,
        units_sold_per_month: map.f64("input.units_sold_per_month")?,
        customs_value_override: map.opt_f64("input.customs_value_override")?,
    };

    let result = ImportCostBreakdown {
        fob: map.f64("result.fob")?,
        freight: map.f64("result.freight")?,
        insurance: map.f64("result.insurance")?,
        cif: map.f64("result.cif")?,
        duty: map.f64("result.duty")?,
        stat_tax: map.f64("result.stat_tax")?,
        tax_base: map.f64("result.tax_base")?,
        vat: map.f64("result.vat")?,
        vat_withholding: map.f64("result.vat_withholding")?,
        income_tax_withholding: map.f64("result.income_tax_withholding")?,
        gross_receipts_withholding: map.f64("result.gross_receipts_withholding")?,
        dumping: map.f64("result.dumping")?,
        extras: map.f64("result.extras")?,
        total: map.f64("result.total")?,
        credit_eligible_amount: map.f64("result.credit_eligible_amount")?,
        net_cost_registered_taxpayer: map.f64("result.net_cost_registered_taxpayer")?,
        net_cost_flat_taxpayer: map.f64("result.net_cost_flat_taxpayer")?,
        unit_cost_registered: map.f64("result.unit_cost_registered")?,
        unit_cost_flat: map.f64("result.unit_cost_flat")?,
        suggested_price_ex_vat: map.f64("result.suggested_price_ex_vat")?,
        suggested_price_with_vat: map.f64("result.suggested_price_with_vat")?,
        monthly_vat_output: map.f64("result.monthly_vat_output")?,
        credit_absorption_months: map.opt_u32("result.credit_absorption_months")?,
    };

    Ok((input, result))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landed;

    fn sample() -> (ImportCalculationInput, ImportCostBreakdown) {
        let input = ImportCalculationInput {
            quantity: 200,
            unit_price_usd: 51.5,
            cubic_meters: 5.15,
            freight_per_cubic_meter: 400.0,
            insurance: Rate::from_percent(1.0),
            duty: Rate::from_fraction(0.2),
            stat_tax: Rate::from_fraction(0.03),
            vat: Rate::from_fraction(0.21),
            vat_withholding: Rate::from_fraction(0.2),
            income_tax_withholding: Rate::from_fraction(0.06),
            units: 200,
            multiplier: 2.2,
            units_sold_per_month: 40.0,
            ..ImportCalculationInput::default()
        };
        let result = landed::calculate(&input);
        (input, result)
    }

    #[test]
    fn test_rows_are_inputs_first_then_outputs() {
        let (input, result) = sample();
        let rows = snapshot_rows(&input, &result);

        let first_result = rows
            .iter()
            .position(|(f, _)| f.starts_with("result."))
            .unwrap();
        assert!(rows[..first_result]
            .iter()
            .all(|(f, _)| f.starts_with("input.")));
        assert!(rows[first_result..]
            .iter()
            .all(|(f, _)| f.starts_with("result.")));
        assert_eq!(rows[0].0, "input.quantity");
        assert_eq!(rows[first_result].0, "result.fob");
    }

    #[test]
    fn test_every_cell_is_quoted() {
        let (input, result) = sample();
        let csv = to_csv_string(&input, &result).unwrap();
        for line in csv.lines() {
            assert!(line.starts_with('"') && line.ends_with('"'), "{line}");
        }
    }

    #[test]
    fn test_round_trip_reproduces_every_numeric_field() {
        let (input, result) = sample();
        let csv = to_csv_string(&input, &result).unwrap();
        let (parsed_input, parsed_result) = read_csv(csv.as_bytes()).unwrap();

        // Shortest round-trip formatting makes this exact; 1e-9 leaves
        // headroom for alternate formatters.
        assert!((parsed_result.total - result.total).abs() < 1e-9);
        assert!((parsed_result.tax_base - result.tax_base).abs() < 1e-9);
        assert_eq!(parsed_input, input);
        assert_eq!(parsed_result, result);
    }

    #[test]
    fn test_absent_optionals_round_trip_as_none() {
        let input = ImportCalculationInput::default();
        let result = landed::calculate(&input);
        let csv = to_csv_string(&input, &result).unwrap();
        let (parsed_input, parsed_result) = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed_input.manual_sale_price, None);
        assert_eq!(parsed_input.customs_value_override, None);
        assert_eq!(parsed_result.credit_absorption_months, None);
    }

    #[test]
    fn test_missing_field_is_a_malformed_snapshot() {
        let err = read_csv("\"input.quantity\",\"200\"\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedSnapshot(_)));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        // The writer doubles embedded quotes; exercised via a raw record.
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());
        writer.write_record(["label", "14\" pan"]).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "\"label\",\"14\"\" pan\"\n");
    }
}
