//! # Batch Repository
//!
//! Database operations for purchase batches.
//!
//! ## Snapshot Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Batch Saves Work                                 │
//! │                                                                         │
//! │  Planner state (PurchaseBatch)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  batch.figures()  ← derived figures recomputed at write time           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT/UPDATE: batch fields + figure snapshot columns, in ONE         │
//! │  statement. A batch is never partially persisted.                      │
//! │                                                                         │
//! │  Reads return only the batch fields; live figures are recomputed by    │
//! │  the caller (pure function). The snapshot columns serve reporting      │
//! │  queries that never load the engine.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use importa_core::PurchaseBatch;

/// Columns hydrated into a [`PurchaseBatch`] on read.
const BATCH_COLUMNS: &str = "id, tenant_id, name, brand, code, purchase_date, \
     unit_kind, units_per_pack, pack_count, cost_per_pack, total_cost, \
     import_expenses, exchange_rate_kind, exchange_rate, image_url, \
     created_at, updated_at";

/// Repository for purchase batch database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BatchRepository::new(pool);
///
/// repo.insert(&batch).await?;
/// let batches = repo.list(tenant_id, 50).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BatchRepository {
    pool: SqlitePool,
}

impl BatchRepository {
    /// Creates a new BatchRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BatchRepository { pool }
    }

    /// Inserts a new batch snapshot.
    ///
    /// Derived figures are recomputed from the batch at write time and
    /// stored alongside it, so the row is a complete self-describing
    /// snapshot.
    pub async fn insert(&self, batch: &PurchaseBatch) -> DbResult<()> {
        debug!(id = %batch.id, name = %batch.name, "Inserting purchase batch");

        let figures = batch.figures();

        sqlx::query(
            r#"
            INSERT INTO purchase_batches (
                id, tenant_id, name, brand, code, purchase_date,
                unit_kind, units_per_pack, pack_count, cost_per_pack,
                total_cost, import_expenses, exchange_rate_kind,
                exchange_rate, image_url,
                real_unit_cost_usd, unit_cost_local,
                cost_per_pack_usd, cost_per_pack_local,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13,
                ?14, ?15,
                ?16, ?17,
                ?18, ?19,
                ?20, ?21
            )
            "#,
        )
        .bind(&batch.id)
        .bind(&batch.tenant_id)
        .bind(&batch.name)
        .bind(&batch.brand)
        .bind(&batch.code)
        .bind(batch.purchase_date)
        .bind(batch.unit_kind)
        .bind(batch.units_per_pack)
        .bind(batch.pack_count)
        .bind(batch.cost_per_pack)
        .bind(batch.total_cost)
        .bind(batch.import_expenses)
        .bind(batch.exchange_rate_kind)
        .bind(batch.exchange_rate)
        .bind(&batch.image_url)
        .bind(figures.real_unit_cost_usd)
        .bind(figures.unit_cost_local)
        .bind(figures.cost_per_pack_usd)
        .bind(figures.cost_per_pack_local)
        .bind(batch.created_at)
        .bind(batch.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing batch snapshot in place.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Batch doesn't exist
    pub async fn update(&self, batch: &PurchaseBatch) -> DbResult<()> {
        debug!(id = %batch.id, "Updating purchase batch");

        let figures = batch.figures();

        let result = sqlx::query(
            r#"
            UPDATE purchase_batches SET
                name = ?2,
                brand = ?3,
                code = ?4,
                purchase_date = ?5,
                unit_kind = ?6,
                units_per_pack = ?7,
                pack_count = ?8,
                cost_per_pack = ?9,
                total_cost = ?10,
                import_expenses = ?11,
                exchange_rate_kind = ?12,
                exchange_rate = ?13,
                image_url = ?14,
                real_unit_cost_usd = ?15,
                unit_cost_local = ?16,
                cost_per_pack_usd = ?17,
                cost_per_pack_local = ?18,
                updated_at = ?19
            WHERE id = ?1
            "#,
        )
        .bind(&batch.id)
        .bind(&batch.name)
        .bind(&batch.brand)
        .bind(&batch.code)
        .bind(batch.purchase_date)
        .bind(batch.unit_kind)
        .bind(batch.units_per_pack)
        .bind(batch.pack_count)
        .bind(batch.cost_per_pack)
        .bind(batch.total_cost)
        .bind(batch.import_expenses)
        .bind(batch.exchange_rate_kind)
        .bind(batch.exchange_rate)
        .bind(&batch.image_url)
        .bind(figures.real_unit_cost_usd)
        .bind(figures.unit_cost_local)
        .bind(figures.cost_per_pack_usd)
        .bind(figures.cost_per_pack_local)
        .bind(batch.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PurchaseBatch", &batch.id));
        }

        Ok(())
    }

    /// Gets a batch by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(PurchaseBatch))` - Batch found
    /// * `Ok(None)` - Batch not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PurchaseBatch>> {
        let batch = sqlx::query_as::<_, PurchaseBatch>(&format!(
            "SELECT {BATCH_COLUMNS} FROM purchase_batches WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(batch)
    }

    /// Lists batches for a tenant, newest first.
    pub async fn list(&self, tenant_id: &str, limit: u32) -> DbResult<Vec<PurchaseBatch>> {
        let batches = sqlx::query_as::<_, PurchaseBatch>(&format!(
            "SELECT {BATCH_COLUMNS} FROM purchase_batches \
             WHERE tenant_id = ?1 ORDER BY created_at DESC LIMIT ?2"
        ))
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = batches.len(), "Listed purchase batches");
        Ok(batches)
    }

    /// Deletes a batch.
    ///
    /// Hard delete: drafts are disposable and nothing references them.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting purchase batch");

        let result = sqlx::query("DELETE FROM purchase_batches WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PurchaseBatch", id));
        }

        Ok(())
    }

    /// Counts batches for a tenant (for diagnostics).
    pub async fn count(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_batches WHERE tenant_id = ?1")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
