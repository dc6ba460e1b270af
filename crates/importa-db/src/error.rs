//! # Store Errors
//!
//! Error taxonomy for the snapshot store.
//!
//! The costing engine itself never errors (degenerate inputs degrade to
//! zeros); everything in this module is about the boundary between the
//! engine and SQLite. Raw `sqlx::Error`s are triaged into variants the
//! admin API can act on: "not found" renders a 404-style message,
//! constraint violations become form feedback, the rest are logged and
//! surfaced as internal failures.

use thiserror::Error;

/// A failed store operation.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The database file could not be opened or the pool built: bad
    /// path, permissions, full disk.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A schema migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Statement execution failed for a non-constraint reason.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A JSON payload column could not be encoded or decoded.
    ///
    /// Seen when a `saved_calculations` row was written by a newer schema
    /// version, or a payload was edited by hand.
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every pooled connection was busy past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that the variants above don't classify.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Shorthand for [`DbError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            // SQLite reports constraint failures only through the message
            // text ("UNIQUE constraint failed: <table>.<column>" /
            // "FOREIGN KEY constraint failed"), so classify on it.
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
