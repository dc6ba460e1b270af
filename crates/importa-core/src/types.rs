//! # Domain Types
//!
//! Core domain types used throughout Importa.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐       ┌──────────────────────┐               │
//! │  │ImportCalculationInput│ ────► │ ImportCostBreakdown  │               │
//! │  │  ──────────────────  │landed │  ──────────────────  │               │
//! │  │  quantity, FOB price │::calc │  cif, taxes, total   │               │
//! │  │  rates, surcharges   │       │  net costs, price    │               │
//! │  └──────────────────────┘       └──────────────────────┘               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PurchaseBatch  │   │    UnitKind     │   │ExchangeRateKind │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  Unit (→1)      │   │  Official       │       │
//! │  │  pack triangle  │   │  Dozen (→12)    │   │  Blue           │       │
//! │  │  exchange rate  │   │  Pack (→10)     │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Persisted entities carry:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `tenant_id`: opaque storefront scope for multi-tenant persistence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Rate;

// =============================================================================
// Landed-Cost Calculator
// =============================================================================

/// Input record for the landed-cost pipeline.
///
/// Immutable value record: the calculator form reconstructs a fresh input on
/// every keystroke and recomputes the whole breakdown from scratch. There is
/// no partial or incremental state.
///
/// All monetary fields are USD f64; all rates are [`Rate`] fractions,
/// normalized at the form boundary (see [`Rate::from_percent`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportCalculationInput {
    /// Units purchased (FOB quantity).
    pub quantity: u32,

    /// FOB price per unit, USD.
    pub unit_price_usd: f64,

    /// Shipment volume in cubic meters.
    pub cubic_meters: f64,

    /// Freight cost per cubic meter, USD.
    pub freight_per_cubic_meter: f64,

    /// International insurance rate, applied to FOB.
    pub insurance: Rate,

    /// Import duty rate, applied to CIF.
    pub duty: Rate,

    /// Statistics tax rate, applied to CIF.
    pub stat_tax: Rate,

    /// VAT rate, applied to the tax base.
    pub vat: Rate,

    /// Additional VAT withholding rate, applied to the tax base.
    pub vat_withholding: Rate,

    /// Income-tax withholding rate, applied to the tax base.
    pub income_tax_withholding: Rate,

    /// Gross-receipts withholding rate, applied to the tax base.
    /// Never creditable.
    pub gross_receipts_withholding: Rate,

    /// Anti-dumping duty rate, applied to the tax base. Never creditable.
    pub dumping: Rate,

    /// Customs digitization fee, fixed USD.
    pub digitization: f64,

    /// Broker/operating expenses, fixed USD.
    pub operating_expenses: f64,

    /// Port and handling fees, fixed USD.
    pub fees: f64,

    /// Certification costs, fixed USD.
    pub certifications: f64,

    /// Other taxes not covered above, fixed USD.
    pub extra_taxes: f64,

    /// Unit count for per-unit cost division. Usually equals `quantity`,
    /// but the form allows costing a sub-lot.
    pub units: u32,

    /// Markup multiplier for the suggested sale price.
    pub multiplier: f64,

    /// Manual sale price override (ex-VAT). Used instead of the markup
    /// price when greater than zero.
    pub manual_sale_price: Option<f64>,

    /// Projected monthly sales volume, for the credit-absorption horizon.
    pub units_sold_per_month: f64,

    /// Customs reference value ("valor criterio"). When greater than zero
    /// it REPLACES the computed CIF+duty+stat tax base entirely.
    pub customs_value_override: Option<f64>,
}

impl Default for ImportCalculationInput {
    fn default() -> Self {
        ImportCalculationInput {
            quantity: 0,
            unit_price_usd: 0.0,
            cubic_meters: 0.0,
            freight_per_cubic_meter: 0.0,
            insurance: Rate::zero(),
            duty: Rate::zero(),
            stat_tax: Rate::zero(),
            vat: Rate::zero(),
            vat_withholding: Rate::zero(),
            income_tax_withholding: Rate::zero(),
            gross_receipts_withholding: Rate::zero(),
            dumping: Rate::zero(),
            digitization: 0.0,
            operating_expenses: 0.0,
            fees: 0.0,
            certifications: 0.0,
            extra_taxes: 0.0,
            units: 0,
            multiplier: 1.0,
            manual_sale_price: None,
            units_sold_per_month: 0.0,
            customs_value_override: None,
        }
    }
}

/// Output record of the landed-cost pipeline.
///
/// Every field is derived; nothing here is user-entered. Persistence stores
/// the whole record verbatim next to its input (snapshot pattern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportCostBreakdown {
    /// FOB value: quantity × unit price.
    pub fob: f64,
    /// International freight: volume × rate per cubic meter.
    pub freight: f64,
    /// Insurance on FOB.
    pub insurance: f64,
    /// CIF value: FOB + freight + insurance.
    pub cif: f64,
    /// Import duty on CIF.
    pub duty: f64,
    /// Statistics tax on CIF.
    pub stat_tax: f64,
    /// Tax base: customs reference value when present, else
    /// CIF + duty + stat tax.
    pub tax_base: f64,
    /// VAT on the tax base.
    pub vat: f64,
    /// VAT withholding on the tax base.
    pub vat_withholding: f64,
    /// Income-tax withholding on the tax base.
    pub income_tax_withholding: f64,
    /// Gross-receipts withholding on the tax base. Never creditable.
    pub gross_receipts_withholding: f64,
    /// Anti-dumping duty on the tax base. Never creditable.
    pub dumping: f64,
    /// Sum of the five fixed surcharges.
    pub extras: f64,
    /// Total landed cost.
    pub total: f64,
    /// Fiscal credit a registered taxpayer recovers:
    /// VAT + VAT withholding + income-tax withholding.
    pub credit_eligible_amount: f64,
    /// Landed cost net of fiscal credit (registered taxpayer).
    pub net_cost_registered_taxpayer: f64,
    /// Landed cost for a flat-rate taxpayer (recovers nothing).
    pub net_cost_flat_taxpayer: f64,
    /// Per-unit cost, registered regime.
    pub unit_cost_registered: f64,
    /// Per-unit cost, flat-rate regime.
    pub unit_cost_flat: f64,
    /// Suggested sale price before VAT.
    pub suggested_price_ex_vat: f64,
    /// Suggested sale price including VAT.
    pub suggested_price_with_vat: f64,
    /// Output VAT generated per month at the projected sales volume.
    pub monthly_vat_output: f64,
    /// Months of sales needed to absorb the accumulated fiscal credit.
    /// `None` means "cannot estimate" (zero monthly VAT output).
    pub credit_absorption_months: Option<u32>,
}

// =============================================================================
// Purchase Planner
// =============================================================================

/// The selling unit a batch is priced in.
///
/// Changing the kind resets `units_per_pack` to the kind default as a
/// convenience; the user may still override it afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Sold individually.
    Unit,
    /// Sold by the dozen.
    Dozen,
    /// Sold in supplier packs.
    Pack,
}

impl UnitKind {
    /// Default units-per-pack for this kind (convenience, not a constraint).
    #[inline]
    pub const fn default_units_per_pack(&self) -> u32 {
        match self {
            UnitKind::Unit => 1,
            UnitKind::Dozen => 12,
            UnitKind::Pack => 10,
        }
    }
}

impl Default for UnitKind {
    fn default() -> Self {
        UnitKind::Dozen
    }
}

/// Which published exchange rate a batch is converted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeRateKind {
    /// Official bank rate.
    Official,
    /// Informal ("blue") market rate.
    Blue,
}

impl ExchangeRateKind {
    /// Quote endpoint path segment for this kind.
    pub const fn as_path_segment(&self) -> &'static str {
        match self {
            ExchangeRateKind::Official => "oficial",
            ExchangeRateKind::Blue => "blue",
        }
    }
}

impl Default for ExchangeRateKind {
    fn default() -> Self {
        ExchangeRateKind::Official
    }
}

/// A purchase batch draft edited interactively in the planner.
///
/// ## Invariant
/// `total_cost == pack_count × cost_per_pack` after any triangle edit; the
/// field NOT just edited is the one recomputed (see
/// [`PurchaseBatch::apply_edit`]).
///
/// ## Lifecycle
/// Created with [`PurchaseBatch::new`] defaults, edited while the planner
/// recomputes [`PurchaseFigures`](crate::types::PurchaseFigures) on every
/// render, persisted as a whole snapshot on explicit save. Never partially
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PurchaseBatch {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant (storefront) this batch belongs to.
    pub tenant_id: String,

    /// Display name shown in the planner and admin listings.
    pub name: String,

    /// Brand, free text.
    pub brand: Option<String>,

    /// Supplier/internal code.
    pub code: Option<String>,

    /// Date the batch was purchased.
    #[ts(as = "Option<String>")]
    pub purchase_date: Option<NaiveDate>,

    /// Selling unit for this batch.
    pub unit_kind: UnitKind,

    /// Individual units per pack (≥1).
    pub units_per_pack: u32,

    /// Number of packs purchased.
    pub pack_count: u32,

    /// Cost per pack, USD.
    pub cost_per_pack: f64,

    /// Total batch cost, USD. Kept consistent with
    /// pack_count × cost_per_pack by the triangle rule.
    pub total_cost: f64,

    /// Ancillary import expenses for the batch, USD. Distributed evenly
    /// across every individual unit.
    pub import_expenses: f64,

    /// Which published rate `exchange_rate` was fetched from.
    pub exchange_rate_kind: ExchangeRateKind,

    /// Local-currency sell rate, injected by the caller after fetching a
    /// quote. Zero when no quote is available; conversion degrades to 0.
    pub exchange_rate: f64,

    /// Product image, uploaded elsewhere.
    pub image_url: Option<String>,

    /// When the batch was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the batch was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Derived per-unit figures for a batch.
///
/// Pure function of the batch state, recomputed on every render and never
/// cached. Persisted only as part of the full snapshot on save.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseFigures {
    /// pack_count × units_per_pack.
    pub total_units: u32,
    /// True per-unit cost: (total_cost + import_expenses) / total_units.
    pub real_unit_cost_usd: f64,
    /// Per-unit cost converted at the injected exchange rate.
    pub unit_cost_local: f64,
    /// Per-pack cost derived from the true per-unit cost.
    pub cost_per_pack_usd: f64,
    /// Per-pack cost converted at the injected exchange rate.
    pub cost_per_pack_local: f64,
}

/// Discriminator for triangle edits.
///
/// The planner passes exactly one changed field per call rather than
/// diffing old/new state, so a batched UI update can never leave the
/// triangle ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "field", content = "value")]
pub enum BatchEdit {
    /// User edited the per-pack cost; total is recomputed.
    CostPerPack(f64),
    /// User edited the pack count; total is recomputed.
    PackCount(u32),
    /// User edited the total; per-pack cost is recomputed when possible.
    TotalCost(f64),
}

// =============================================================================
// Saved Calculations
// =============================================================================

/// A persisted landed-cost calculation snapshot.
///
/// Input and result are stored verbatim: the store performs no
/// computation and the result is NOT recomputed on load, so historical
/// snapshots survive rate-table changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SavedCalculation {
    pub id: String,
    pub tenant_id: String,
    /// User label, e.g. "Q3 container, kitchenware".
    pub label: String,
    pub input: ImportCalculationInput,
    pub result: ImportCostBreakdown,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_kind_defaults() {
        assert_eq!(UnitKind::Unit.default_units_per_pack(), 1);
        assert_eq!(UnitKind::Dozen.default_units_per_pack(), 12);
        assert_eq!(UnitKind::Pack.default_units_per_pack(), 10);
        assert_eq!(UnitKind::default(), UnitKind::Dozen);
    }

    #[test]
    fn test_exchange_rate_kind_path_segment() {
        assert_eq!(ExchangeRateKind::Official.as_path_segment(), "oficial");
        assert_eq!(ExchangeRateKind::Blue.as_path_segment(), "blue");
    }

    #[test]
    fn test_input_default_is_degenerate_zero() {
        let input = ImportCalculationInput::default();
        assert_eq!(input.quantity, 0);
        assert_eq!(input.multiplier, 1.0);
        assert!(input.manual_sale_price.is_none());
        assert!(input.customs_value_override.is_none());
    }

    #[test]
    fn test_batch_edit_serde_tagging() {
        let edit = BatchEdit::TotalCost(80.0);
        let json = serde_json::to_string(&edit).unwrap();
        assert_eq!(json, r#"{"field":"total_cost","value":80.0}"#);
    }
}
