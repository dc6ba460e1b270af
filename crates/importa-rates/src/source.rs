//! # RateSource Trait
//!
//! The capability the purchase workflow receives instead of a hard-wired
//! HTTP call. Injecting the source keeps the calculation core
//! side-effect-free and unit-testable without network mocking.

use async_trait::async_trait;
use chrono::Utc;

use importa_core::types::ExchangeRateKind;

use crate::error::RateResult;
use crate::quote::ExchangeQuote;

/// A read-only lookup of the current quote for a rate kind.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the current quote for `kind`.
    async fn quote(&self, kind: ExchangeRateKind) -> RateResult<ExchangeQuote>;
}

/// A source that always answers with configured quotes.
///
/// ## Usage
/// Tests, demos, and offline operation (pin yesterday's rate and keep
/// planning).
#[derive(Debug, Clone)]
pub struct FixedRateSource {
    official: ExchangeQuote,
    blue: ExchangeQuote,
}

impl FixedRateSource {
    /// Creates a source answering `official` and `blue` for the respective
    /// kinds.
    pub fn new(official: ExchangeQuote, blue: ExchangeQuote) -> Self {
        FixedRateSource { official, blue }
    }

    /// Creates a source quoting the same sell rate for both kinds, with
    /// buy == sell and a current timestamp.
    pub fn pinned(sell: f64) -> Self {
        let quote = ExchangeQuote {
            buy: sell,
            sell,
            as_of: Utc::now(),
        };
        FixedRateSource {
            official: quote,
            blue: quote,
        }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    async fn quote(&self, kind: ExchangeRateKind) -> RateResult<ExchangeQuote> {
        Ok(match kind {
            ExchangeRateKind::Official => self.official,
            ExchangeRateKind::Blue => self.blue,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
