//! # Migrations
//!
//! Schema migrations for the snapshot store, embedded at compile time
//! from `migrations/sqlite/` so deployed binaries carry their own schema.
//!
//! Migration files are append-only: a schema change is a new
//! `NNN_description.sql` with the next sequence number, never an edit to
//! a shipped file (sqlx checksums applied migrations and refuses to run
//! against a mutated history).

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// All migrations under `migrations/sqlite`, baked into the binary.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies pending migrations. Idempotent; each file runs once, in
/// sequence order, inside its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// Returns `(known, applied)` migration counts, for startup diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
