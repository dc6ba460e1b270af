//! # Purchase Unit-Cost Pipeline
//!
//! Maintains a self-consistent batch draft under single-field edits and
//! derives true per-unit costs. Pure computation; the exchange rate is
//! fetched elsewhere (importa-rates) and injected as a plain number.
//!
//! ## The Cost Triangle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │          pack_count ◄──────► cost_per_pack ◄──────► total_cost          │
//! │                                                                         │
//! │  The three fields are two-way bound in the planner UI. Rather than     │
//! │  diffing old/new state to guess which one changed, the UI passes an    │
//! │  explicit BatchEdit tag:                                                │
//! │                                                                         │
//! │    CostPerPack / PackCount  ──► total_cost  = count × per_pack         │
//! │    TotalCost                ──► cost_per_pack = total / count          │
//! │                                 (only when count > 0; otherwise the    │
//! │                                  per-pack cost is left untouched)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use uuid::Uuid;

use crate::types::{BatchEdit, ExchangeRateKind, PurchaseBatch, PurchaseFigures, UnitKind};

impl PurchaseBatch {
    /// Creates an empty draft with planner defaults.
    ///
    /// Defaults: dozen pricing (12 units per pack), one pack, everything
    /// else zero. The draft is not persisted until the user saves it.
    pub fn new(tenant_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        PurchaseBatch {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.into(),
            name: name.into(),
            brand: None,
            code: None,
            purchase_date: None,
            unit_kind: UnitKind::Dozen,
            units_per_pack: UnitKind::Dozen.default_units_per_pack(),
            pack_count: 1,
            cost_per_pack: 0.0,
            total_cost: 0.0,
            import_expenses: 0.0,
            exchange_rate_kind: ExchangeRateKind::Official,
            exchange_rate: 0.0,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a single triangle edit, recomputing the field that was NOT
    /// just edited.
    ///
    /// ## Tie-Break Rule
    /// - `CostPerPack` / `PackCount` → `total_cost` is recomputed
    /// - `TotalCost` → `cost_per_pack` is recomputed, but only when
    ///   `pack_count > 0`; with zero packs the per-pack cost is left
    ///   unchanged (no division by zero, no nulling out)
    ///
    /// ## Example
    /// ```rust
    /// use importa_core::types::{BatchEdit, PurchaseBatch};
    ///
    /// let mut batch = PurchaseBatch::new("tenant", "LED strips");
    /// batch.apply_edit(BatchEdit::CostPerPack(10.0));
    /// batch.apply_edit(BatchEdit::PackCount(5));
    /// assert_eq!(batch.total_cost, 50.0);
    ///
    /// batch.apply_edit(BatchEdit::TotalCost(80.0));
    /// assert_eq!(batch.cost_per_pack, 16.0);
    /// ```
    pub fn apply_edit(&mut self, edit: BatchEdit) {
        match edit {
            BatchEdit::CostPerPack(cost) => {
                self.cost_per_pack = cost;
                self.total_cost = self.pack_count as f64 * self.cost_per_pack;
            }
            BatchEdit::PackCount(count) => {
                self.pack_count = count;
                self.total_cost = self.pack_count as f64 * self.cost_per_pack;
            }
            BatchEdit::TotalCost(total) => {
                self.total_cost = total;
                if self.pack_count > 0 {
                    self.cost_per_pack = self.total_cost / self.pack_count as f64;
                }
            }
        }
        self.updated_at = Utc::now();
    }

    /// Changes the selling unit and resets `units_per_pack` to the kind
    /// default (Unit→1, Dozen→12, Pack→10).
    ///
    /// The reset is a convenience, not a constraint: the user may write any
    /// `units_per_pack` afterward.
    pub fn set_unit_kind(&mut self, kind: UnitKind) {
        self.unit_kind = kind;
        self.units_per_pack = kind.default_units_per_pack();
        self.updated_at = Utc::now();
    }

    /// Derives the per-unit and converted figures for the current state.
    ///
    /// Recomputed on every render, never cached. Degenerate states (zero
    /// units, zero exchange rate) produce zeros, never NaN or a panic:
    /// a stale or failed quote fetch must not block the planner.
    pub fn figures(&self) -> PurchaseFigures {
        let total_units = self.pack_count * self.units_per_pack;

        // Import expenses are distributed evenly across every individual
        // unit, not per pack.
        let real_unit_cost_usd = if total_units > 0 {
            (self.total_cost + self.import_expenses) / total_units as f64
        } else {
            0.0
        };

        let unit_cost_local = if self.exchange_rate > 0.0 {
            real_unit_cost_usd * self.exchange_rate
        } else {
            0.0
        };

        let cost_per_pack_usd = real_unit_cost_usd * self.units_per_pack as f64;
        let cost_per_pack_local = if self.exchange_rate > 0.0 {
            cost_per_pack_usd * self.exchange_rate
        } else {
            0.0
        };

        PurchaseFigures {
            total_units,
            real_unit_cost_usd,
            unit_cost_local,
            cost_per_pack_usd,
            cost_per_pack_local,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TENANT_ID as TENANT;

    const EPS: f64 = 1e-9;

    fn draft() -> PurchaseBatch {
        PurchaseBatch::new(TENANT, "Thermos 1L")
    }

    #[test]
    fn test_new_draft_defaults() {
        let batch = draft();
        assert_eq!(batch.unit_kind, UnitKind::Dozen);
        assert_eq!(batch.units_per_pack, 12);
        assert_eq!(batch.pack_count, 1);
        assert_eq!(batch.total_cost, 0.0);
        assert_eq!(batch.exchange_rate_kind, ExchangeRateKind::Official);
    }

    #[test]
    fn test_triangle_edit_sequence() {
        let mut batch = draft();

        batch.apply_edit(BatchEdit::CostPerPack(10.0));
        batch.apply_edit(BatchEdit::PackCount(5));
        assert_eq!(batch.total_cost, 50.0);

        // Editing the total with pack_count still 5 rewrites per-pack cost.
        batch.apply_edit(BatchEdit::TotalCost(80.0));
        assert_eq!(batch.pack_count, 5);
        assert_eq!(batch.cost_per_pack, 16.0);
        assert_eq!(batch.total_cost, 80.0);
    }

    #[test]
    fn test_total_edit_with_zero_packs_keeps_per_pack_cost() {
        let mut batch = draft();
        batch.apply_edit(BatchEdit::CostPerPack(10.0));
        batch.apply_edit(BatchEdit::PackCount(0));
        assert_eq!(batch.total_cost, 0.0);

        batch.apply_edit(BatchEdit::TotalCost(99.0));
        // No division by zero; the stale per-pack cost survives untouched.
        assert_eq!(batch.cost_per_pack, 10.0);
        assert_eq!(batch.total_cost, 99.0);
    }

    #[test]
    fn test_unit_kind_reset_is_overridable() {
        let mut batch = draft();
        batch.set_unit_kind(UnitKind::Pack);
        assert_eq!(batch.units_per_pack, 10);

        batch.set_unit_kind(UnitKind::Unit);
        assert_eq!(batch.units_per_pack, 1);

        // Convenience default, not a constraint.
        batch.units_per_pack = 6;
        assert_eq!(batch.figures().total_units, batch.pack_count * 6);
    }

    #[test]
    fn test_figures_distribute_import_expenses_per_unit() {
        let mut batch = draft();
        batch.apply_edit(BatchEdit::CostPerPack(24.0));
        batch.apply_edit(BatchEdit::PackCount(10)); // 120 units, $240
        batch.import_expenses = 60.0;

        let f = batch.figures();
        assert_eq!(f.total_units, 120);
        assert!((f.real_unit_cost_usd - 2.5).abs() < EPS); // (240+60)/120
        assert!((f.cost_per_pack_usd - 30.0).abs() < EPS);
    }

    #[test]
    fn test_figures_monotone_in_import_expenses() {
        let mut batch = draft();
        batch.apply_edit(BatchEdit::CostPerPack(24.0));
        batch.apply_edit(BatchEdit::PackCount(10));

        let mut previous = 0.0;
        for expenses in [0.0, 10.0, 60.0, 60.0, 1000.0] {
            batch.import_expenses = expenses;
            let cost = batch.figures().real_unit_cost_usd;
            assert!(cost >= previous);
            previous = cost;
        }
    }

    #[test]
    fn test_figures_with_zero_units_are_zero_not_nan() {
        let mut batch = draft();
        batch.apply_edit(BatchEdit::PackCount(0));
        batch.import_expenses = 50.0;

        let f = batch.figures();
        assert_eq!(f.total_units, 0);
        assert_eq!(f.real_unit_cost_usd, 0.0);
        assert_eq!(f.unit_cost_local, 0.0);
        assert!(!f.cost_per_pack_usd.is_nan());
    }

    #[test]
    fn test_zero_exchange_rate_degrades_conversions_to_zero() {
        let mut batch = draft();
        batch.apply_edit(BatchEdit::CostPerPack(24.0));
        batch.apply_edit(BatchEdit::PackCount(10));

        // No quote yet: converted figures are zero, USD figures intact.
        let f = batch.figures();
        assert_eq!(f.unit_cost_local, 0.0);
        assert_eq!(f.cost_per_pack_local, 0.0);
        assert!(f.real_unit_cost_usd > 0.0);

        batch.exchange_rate = 1350.0;
        let f = batch.figures();
        assert!((f.unit_cost_local - f.real_unit_cost_usd * 1350.0).abs() < EPS);
        assert!((f.cost_per_pack_local - f.cost_per_pack_usd * 1350.0).abs() < EPS);
    }
}
