//! # Saved Calculation Repository
//!
//! Persistence for landed-cost calculation snapshots.
//!
//! ## Verbatim Snapshots
//! A saved calculation stores BOTH the input container and the computed
//! breakdown as JSON payload columns, exactly as they were at save time.
//! Loading one never re-runs the engine, so a snapshot keeps showing the
//! numbers the user saw even if tax rates or formulas change later.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use importa_core::types::{ImportCalculationInput, ImportCostBreakdown, SavedCalculation};

/// Repository for saved landed-cost calculations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CalculationRepository::new(pool);
///
/// let saved = repo.insert(tenant_id, "Container March", &input, &result).await?;
/// let history = repo.list(tenant_id, 50).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    pool: SqlitePool,
}

impl CalculationRepository {
    /// Creates a new CalculationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CalculationRepository { pool }
    }

    /// Saves a calculation snapshot and returns the stored record.
    pub async fn insert(
        &self,
        tenant_id: &str,
        label: &str,
        input: &ImportCalculationInput,
        result: &ImportCostBreakdown,
    ) -> DbResult<SavedCalculation> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        debug!(id = %id, label = %label, "Saving calculation snapshot");

        let input_json = serde_json::to_string(input)?;
        let result_json = serde_json::to_string(result)?;

        sqlx::query(
            r#"
            INSERT INTO saved_calculations (
                id, tenant_id, label, input_json, result_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&id)
        .bind(tenant_id)
        .bind(label)
        .bind(&input_json)
        .bind(&result_json)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(SavedCalculation {
            id,
            tenant_id: tenant_id.to_string(),
            label: label.to_string(),
            input: input.clone(),
            result: result.clone(),
            created_at,
        })
    }

    /// Gets a saved calculation by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SavedCalculation>> {
        let row = sqlx::query(
            "SELECT id, tenant_id, label, input_json, result_json, created_at \
             FROM saved_calculations WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_calculation).transpose()
    }

    /// Lists saved calculations for a tenant, newest first.
    pub async fn list(&self, tenant_id: &str, limit: u32) -> DbResult<Vec<SavedCalculation>> {
        let rows = sqlx::query(
            "SELECT id, tenant_id, label, input_json, result_json, created_at \
             FROM saved_calculations \
             WHERE tenant_id = ?1 ORDER BY created_at DESC LIMIT ?2",
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed saved calculations");
        rows.into_iter().map(row_to_calculation).collect()
    }

    /// Deletes a saved calculation.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting saved calculation");

        let result = sqlx::query("DELETE FROM saved_calculations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("SavedCalculation", id));
        }

        Ok(())
    }
}

/// Hydrates a saved calculation from a database row.
///
/// JSON payload columns are decoded here; a decode failure surfaces as
/// [`DbError::Serialization`] rather than a silent default.
fn row_to_calculation(row: sqlx::sqlite::SqliteRow) -> DbResult<SavedCalculation> {
    let input_json: String = row.get("input_json");
    let result_json: String = row.get("result_json");

    let input: ImportCalculationInput = serde_json::from_str(&input_json)?;
    let result: ImportCostBreakdown = serde_json::from_str(&result_json)?;

    let created_at: DateTime<Utc> = row.get("created_at");

    Ok(SavedCalculation {
        id: row.get("id"),
        tenant_id: row.get("tenant_id"),
        label: row.get("label"),
        input,
        result,
        created_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use importa_core::money::Rate;
    use importa_core::{landed, DEFAULT_TENANT_ID};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_input() -> ImportCalculationInput {
        ImportCalculationInput {
            quantity: 200,
            unit_price_usd: 51.5,
            cubic_meters: 5.15,
            freight_per_cubic_meter: 400.0,
            insurance: Rate::from_percent(1.0),
            duty: Rate::from_percent(20.0),
            stat_tax: Rate::from_percent(3.0),
            vat: Rate::from_percent(21.0),
            units: 200,
            units_sold_per_month: 40.0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_and_load_verbatim() {
        let db = test_db().await;
        let repo = db.calculations();

        let input = sample_input();
        let result = landed::calculate(&input);

        let saved = repo
            .insert(DEFAULT_TENANT_ID, "Container March", &input, &result)
            .await
            .unwrap();

        let loaded = repo.get_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.label, "Container March");
        // Verbatim: the stored snapshot is the exact structs, not a recompute.
        assert_eq!(loaded.input, input);
        assert_eq!(loaded.result, result);
        assert_eq!(loaded.result.cif, 12463.0);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_tenant_scoped() {
        let db = test_db().await;
        let repo = db.calculations();

        let input = sample_input();
        let result = landed::calculate(&input);

        repo.insert(DEFAULT_TENANT_ID, "first", &input, &result)
            .await
            .unwrap();
        repo.insert("other-tenant", "theirs", &input, &result)
            .await
            .unwrap();
        repo.insert(DEFAULT_TENANT_ID, "second", &input, &result)
            .await
            .unwrap();

        let mine = repo.list(DEFAULT_TENANT_ID, 50).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c.tenant_id == DEFAULT_TENANT_ID));
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let db = test_db().await;
        let repo = db.calculations();

        let input = sample_input();
        let result = landed::calculate(&input);

        let older = repo
            .insert(DEFAULT_TENANT_ID, "older", &input, &result)
            .await
            .unwrap();
        // Backdate the first snapshot so the ordering is unambiguous.
        sqlx::query("UPDATE saved_calculations SET created_at = ?1 WHERE id = ?2")
            .bind(Utc::now() - chrono::Duration::days(30))
            .bind(&older.id)
            .execute(db.pool())
            .await
            .unwrap();

        repo.insert(DEFAULT_TENANT_ID, "newer", &input, &result)
            .await
            .unwrap();

        let listed = repo.list(DEFAULT_TENANT_ID, 50).await.unwrap();
        assert_eq!(listed[0].label, "newer");
        assert_eq!(listed[1].label, "older");
    }

    #[tokio::test]
    async fn test_delete_and_not_found() {
        let db = test_db().await;
        let repo = db.calculations();

        let input = sample_input();
        let result = landed::calculate(&input);
        let saved = repo
            .insert(DEFAULT_TENANT_ID, "temp", &input, &result)
            .await
            .unwrap();

        repo.delete(&saved.id).await.unwrap();
        assert!(repo.get_by_id(&saved.id).await.unwrap().is_none());

        let err = repo.delete(&saved.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_serialization_error() {
        let db = test_db().await;

        sqlx::query(
            "INSERT INTO saved_calculations \
             (id, tenant_id, label, input_json, result_json, created_at) \
             VALUES ('bad', ?1, 'broken', 'not json', '{}', ?2)",
        )
        .bind(DEFAULT_TENANT_ID)
        .bind(Utc::now())
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.calculations().get_by_id("bad").await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
