//! # importa-core: Pure Costing Engine for Importa
//!
//! This crate is the **heart** of Importa. It contains all costing logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Importa Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront (TypeScript)                        │   │
//! │  │   Import Calculator ──► Purchase Planner ──► Admin Screens     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ importa-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  landed   │  │ purchase  │  │   money   │  │  export   │  │   │
//! │  │   │ CIF, tax  │  │ batch &   │  │   Rate    │  │ CSV rows  │  │   │
//! │  │   │ cascade   │  │ unit cost │  │ rounding  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌──────────────┴──────────────▼──────────────┐                        │
//! │  │  importa-db (SQLite)   importa-rates (FX)  │                        │
//! │  └─────────────────────────────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ImportCalculationInput, PurchaseBatch, etc.)
//! - [`money`] - Rate normalization and display rounding helpers
//! - [`landed`] - Landed-cost pipeline (FOB → CIF → taxes → landed cost)
//! - [`purchase`] - Purchase unit-cost pipeline (batch triangle, per-unit cost)
//! - [`export`] - CSV snapshot export/import for calculations
//! - [`error`] - Domain error types
//! - [`validation`] - Form-boundary coercion and validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Full Precision**: The pipelines carry full f64 precision end to end;
//!    rounding to 2 decimals happens only in display helpers
//! 4. **Never Raise**: Degenerate inputs (zero units, zero rate) degrade to
//!    `0` or `None`, never to NaN, Infinity, or a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use importa_core::landed;
//! use importa_core::money::Rate;
//! use importa_core::types::ImportCalculationInput;
//!
//! let input = ImportCalculationInput {
//!     quantity: 200,
//!     unit_price_usd: 51.5,
//!     cubic_meters: 5.15,
//!     freight_per_cubic_meter: 400.0,
//!     insurance: Rate::from_percent(1.0),
//!     duty: Rate::from_fraction(0.2),
//!     stat_tax: Rate::from_fraction(0.03),
//!     vat: Rate::from_fraction(0.21),
//!     ..ImportCalculationInput::default()
//! };
//!
//! let breakdown = landed::calculate(&input);
//! assert!((breakdown.cif - 12463.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod landed;
pub mod money;
pub mod purchase;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use importa_core::Rate` instead of
// `use importa_core::money::Rate`

pub use error::{CoreError, ValidationError};
pub use money::Rate;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tenant ID for v0.1 (single-tenant runtime with multi-tenant schema)
///
/// ## Why a constant?
/// v0.1 serves a single store, but every persisted row carries tenant_id so
/// the same schema serves multiple storefronts later. This constant is used
/// throughout the codebase until dynamic tenant resolution lands.
pub const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Maximum length of a purchase batch name.
///
/// ## Business Reason
/// Keeps admin listings and CSV exports readable; matches the storefront
/// form field limit.
pub const MAX_BATCH_NAME_LEN: usize = 200;
