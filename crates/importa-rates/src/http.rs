//! # HTTP Rate Source
//!
//! [`RateSource`] implementation against a dolarapi-style quote endpoint.
//!
//! ## Endpoint Shape
//! ```text
//! GET {base_url}/oficial   → { "compra": ..., "venta": ..., "fechaActualizacion": ... }
//! GET {base_url}/blue      → same shape
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use importa_core::types::ExchangeRateKind;

use crate::error::{RateError, RateResult};
use crate::quote::{ExchangeQuote, WireQuote};
use crate::source::RateSource;

/// Default public quote endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dolarapi.com/v1/dolares";

/// Default request timeout.
///
/// Quotes are a convenience, not a dependency: a slow endpoint must not
/// hold the planner hostage.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP-backed rate source.
///
/// ## Example
/// ```rust,no_run
/// use importa_core::types::ExchangeRateKind;
/// use importa_rates::{HttpRateSource, RateSource};
///
/// # async fn fetch() -> Result<(), importa_rates::RateError> {
/// let source = HttpRateSource::new()?;
/// let quote = source.quote(ExchangeRateKind::Blue).await?;
/// let rate_for_batch = quote.sell;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRateSource {
    /// Creates a source against the default public endpoint.
    pub fn new() -> RateResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a source against a custom endpoint (staging, local stub).
    pub fn with_base_url(base_url: impl Into<String>) -> RateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(HttpRateSource {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn quote(&self, kind: ExchangeRateKind) -> RateResult<ExchangeQuote> {
        let url = format!("{}/{}", self.base_url, kind.as_path_segment());
        debug!(url = %url, "Fetching exchange-rate quote");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Quote endpoint unavailable");
            return Err(RateError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let wire: WireQuote = response
            .json()
            .await
            .map_err(|e| RateError::Decode(e.to_string()))?;
        let quote = wire.into_quote()?;

        debug!(sell = quote.sell, as_of = %quote.as_of, "Quote received");
        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source_targets_the_https_endpoint() {
        // The client is built with a TLS backend compiled in, so the
        // https default endpoint is actually reachable at runtime.
        let source = HttpRateSource::new().unwrap();
        assert!(source.base_url.starts_with("https://"));
    }

    #[test]
    fn test_url_composition_per_kind() {
        let source = HttpRateSource::with_base_url("http://localhost:9000/v1/dolares").unwrap();
        let url = format!(
            "{}/{}",
            source.base_url,
            ExchangeRateKind::Official.as_path_segment()
        );
        assert_eq!(url, "http://localhost:9000/v1/dolares/oficial");
    }
}
