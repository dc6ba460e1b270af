//! # Quote Error Types
//!
//! Error types for exchange-rate lookups.
//!
//! Retry policy deliberately does NOT live here: the planner keeps its last
//! known rate (or zero) when a fetch fails, and the costing engine degrades
//! gracefully, so a failed quote is never fatal.

use thiserror::Error;

/// Exchange-rate lookup errors.
#[derive(Debug, Error)]
pub enum RateError {
    /// The HTTP request itself failed (DNS, connect, timeout).
    #[error("Quote request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Quote endpoint returned status {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body did not match the expected quote shape.
    #[error("Could not decode quote: {0}")]
    Decode(String),
}

/// Result type for rate operations.
pub type RateResult<T> = Result<T, RateError>;
