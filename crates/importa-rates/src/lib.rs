//! # importa-rates: Exchange-Rate Lookup for Importa
//!
//! This crate provides the live exchange-rate quotes consumed by the
//! purchase planner. It is deliberately thin: fetch a quote, hand back a
//! plain number.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Data Flow                                  │
//! │                                                                         │
//! │  Planner changes rate kind ("official" → "blue")                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RateSource::quote(kind)  ← awaited ONCE per kind change               │
//! │       │                                                                 │
//! │       ├── HttpRateSource: GET {base}/blue → { compra, venta, ... }     │
//! │       └── FixedRateSource: configured quote (tests, offline)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  batch.exchange_rate = quote.sell  ← plain f64, stored on the batch    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  importa-core recomputes figures (pure, no network in sight)           │
//! │                                                                         │
//! │  A failed or stale fetch never blocks computation: the engine          │
//! │  tolerates exchange_rate == 0 and produces zero converted figures.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quote`] - ExchangeQuote DTO and the wire-format mapping
//! - [`source`] - RateSource trait and the fixed in-memory source
//! - [`http`] - HTTP implementation against a dolarapi-style endpoint
//! - [`error`] - Quote fetch/decode error types

pub mod error;
pub mod http;
pub mod quote;
pub mod source;

pub use error::{RateError, RateResult};
pub use http::HttpRateSource;
pub use quote::ExchangeQuote;
pub use source::{FixedRateSource, RateSource};
