//! # importa-db: Database Layer for Importa
//!
//! This crate provides database access for Importa. It uses SQLite for
//! local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Importa Data Flow                                │
//! │                                                                         │
//! │  Admin screen ("save batch" / "save calculation")                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    importa-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (batch.rs,     │   │  (embedded)  │  │   │
//! │  │   │               │    │  calculation)  │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ BatchRepo      │   │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ CalcRepo       │   │              │  │   │
//! │  │   │ Management    │    │                │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   Writes are VERBATIM snapshots - no computation in SQL.       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (per-store local file)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (batch, calculation)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use importa_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/importa.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let batches = db.batches().list(DEFAULT_TENANT_ID, 50).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::batch::BatchRepository;
pub use repository::calculation::CalculationRepository;
