//! # Database Pool
//!
//! SQLite connection pool for the snapshot store.
//!
//! Importa's persistence is deliberately boring: one local database file
//! per store, whole-row snapshot writes from a single interactive form,
//! reads by the admin screens. WAL journaling is enabled so listing
//! batches never waits on a save in flight; beyond that there are no
//! cross-row ordering needs and no transactions spanning statements.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::batch::BatchRepository;
use crate::repository::calculation::CalculationRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Pool configuration for a store's local database file.
///
/// The defaults suit a per-store admin backend: a handful of connections,
/// generous timeouts, migrations applied on connect.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/importa/store.db").max_connections(8);
/// let db = Database::new(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created on first connect.
    pub database_path: PathBuf,

    /// Pool size ceiling. Default: 5.
    pub max_connections: u32,

    /// Connections kept warm. Default: 1.
    pub min_connections: u32,

    /// How long an acquire may wait before failing. Default: 30s.
    pub connect_timeout: Duration,

    /// Idle time before a pooled connection is dropped. Default: 10min.
    pub idle_timeout: Duration,

    /// Apply pending migrations during [`Database::new`]. Default: true.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration with defaults for the given database path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the pool size ceiling.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the number of connections kept warm.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether migrations run during [`Database::new`].
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// In-memory database for tests.
    ///
    /// Pinned to one connection: each in-memory SQLite connection is its
    /// own database, so a second connection would see empty tables.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to a store's database, handing out repositories.
///
/// Cloning is cheap; all clones share the underlying pool.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./importa.db")).await?;
/// let batches = db.batches().list(tenant_id, 50).await?;
/// let history = db.calculations().list(tenant_id, 50).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database file and builds the pool.
    ///
    /// SQLite is configured for the snapshot-store workload: WAL journal,
    /// NORMAL synchronous, foreign keys on. Pending migrations are applied
    /// unless [`DbConfig::run_migrations`] is false.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening store database"
        );

        // mode=rwc creates the file on first connect
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL is durable through application crashes; a power loss
            // can cost at most the last snapshot write
            .synchronous(SqliteSynchronous::Normal)
            // off by default in SQLite
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Called by [`Database::new`] unless
    /// disabled in the config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The raw pool, for queries the repositories don't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository for purchase batch snapshots.
    pub fn batches(&self) -> BatchRepository {
        BatchRepository::new(self.pool.clone())
    }

    /// Repository for saved landed-cost calculations.
    pub fn calculations(&self) -> CalculationRepository {
        CalculationRepository::new(self.pool.clone())
    }

    /// Drains the pool. Call on shutdown; operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing store database");
        self.pool.close().await;
    }

    /// True when the database still answers queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        let db = Database::new(config).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }
}
