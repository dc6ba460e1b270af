//! # Exchange Quote
//!
//! The quote DTO handed to the planner, plus the wire-format mapping for
//! dolarapi-style endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RateError, RateResult};

/// A buy/sell quote for one rate kind at a point in time.
///
/// The purchase pipeline consumes only [`ExchangeQuote::sell`] ("venta"):
/// imported stock is valued at what it costs to buy the dollars back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    /// Buy side ("compra").
    pub buy: f64,
    /// Sell side ("venta"). This is the rate injected into batches.
    pub sell: f64,
    /// When the endpoint last updated the quote.
    pub as_of: DateTime<Utc>,
}

/// Wire format of a dolarapi-style quote endpoint.
///
/// ```json
/// {
///   "compra": 1305.0,
///   "venta": 1345.0,
///   "fechaActualizacion": "2025-08-14T17:04:00.000Z"
/// }
/// ```
/// Unknown fields (casa, nombre, moneda) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct WireQuote {
    compra: f64,
    venta: f64,
    #[serde(rename = "fechaActualizacion")]
    fecha_actualizacion: String,
}

impl WireQuote {
    pub(crate) fn into_quote(self) -> RateResult<ExchangeQuote> {
        let as_of = DateTime::parse_from_rfc3339(&self.fecha_actualizacion)
            .map_err(|e| RateError::Decode(format!("fechaActualizacion: {e}")))?
            .with_timezone(&Utc);

        Ok(ExchangeQuote {
            buy: self.compra,
            sell: self.venta,
            as_of,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_quote_maps_to_exchange_quote() {
        let body = r#"{
            "moneda": "USD",
            "casa": "blue",
            "nombre": "Blue",
            "compra": 1305.0,
            "venta": 1345.0,
            "fechaActualizacion": "2025-08-14T17:04:00.000Z"
        }"#;

        let wire: WireQuote = serde_json::from_str(body).unwrap();
        let quote = wire.into_quote().unwrap();
        assert_eq!(quote.buy, 1305.0);
        assert_eq!(quote.sell, 1345.0);
        assert_eq!(quote.as_of.to_rfc3339(), "2025-08-14T17:04:00+00:00");
    }

    #[test]
    fn test_bad_timestamp_is_a_decode_error() {
        let wire: WireQuote = serde_json::from_str(
            r#"{"compra": 1.0, "venta": 2.0, "fechaActualizacion": "yesterday"}"#,
        )
        .unwrap();
        assert!(matches!(wire.into_quote(), Err(RateError::Decode(_))));
    }
}
