//! # Database Seeder
//!
//! Populates a local database with demo data for development.
//!
//! ## Usage
//! ```bash
//! cargo run --bin seed                    # seeds ./importa.db
//! cargo run --bin seed -- /tmp/demo.db    # seeds a custom path
//! ```
//!
//! Safe to re-run: seeded rows get fresh IDs each time, so repeated runs
//! just add more demo data.

use tracing::info;
use tracing_subscriber::EnvFilter;

use importa_core::money::Rate;
use importa_core::types::{BatchEdit, ExchangeRateKind, ImportCalculationInput, UnitKind};
use importa_core::{landed, PurchaseBatch, DEFAULT_TENANT_ID};
use importa_db::{Database, DbConfig, DbError};

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./importa.db".to_string());

    info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    seed_batches(&db).await?;
    seed_calculations(&db).await?;

    db.close().await;
    info!("Seed complete");
    Ok(())
}

/// Seeds a couple of purchase batches in different planner states.
async fn seed_batches(db: &Database) -> Result<(), DbError> {
    let repo = db.batches();

    // A dozen-based batch entered cost-first.
    let mut thermos = PurchaseBatch::new(DEFAULT_TENANT_ID, "Thermos 1L stainless");
    thermos.brand = Some("Lumilagro".to_string());
    thermos.code = Some("TH-1000".to_string());
    thermos.apply_edit(BatchEdit::CostPerPack(24.0));
    thermos.apply_edit(BatchEdit::PackCount(10));
    thermos.import_expenses = 60.0;
    thermos.exchange_rate_kind = ExchangeRateKind::Blue;
    thermos.exchange_rate = 1345.0;
    repo.insert(&thermos).await?;

    // A pack-based batch entered total-first.
    let mut cups = PurchaseBatch::new(DEFAULT_TENANT_ID, "Plastic cups 300ml");
    cups.set_unit_kind(UnitKind::Pack);
    cups.apply_edit(BatchEdit::PackCount(40));
    cups.apply_edit(BatchEdit::TotalCost(520.0));
    cups.exchange_rate = 1350.0;
    repo.insert(&cups).await?;

    info!("Seeded 2 purchase batches");
    Ok(())
}

/// Seeds a saved landed-cost calculation for a typical mixed container.
async fn seed_calculations(db: &Database) -> Result<(), DbError> {
    let input = ImportCalculationInput {
        quantity: 200,
        unit_price_usd: 51.5,
        cubic_meters: 5.15,
        freight_per_cubic_meter: 400.0,
        insurance: Rate::from_percent(1.0),
        duty: Rate::from_percent(20.0),
        stat_tax: Rate::from_percent(3.0),
        vat: Rate::from_percent(21.0),
        vat_withholding: Rate::from_percent(20.0),
        income_tax_withholding: Rate::from_percent(6.0),
        gross_receipts_withholding: Rate::from_percent(2.5),
        units: 200,
        multiplier: 2.0,
        units_sold_per_month: 40.0,
        ..Default::default()
    };
    let result = landed::calculate(&input);

    db.calculations()
        .insert(DEFAULT_TENANT_ID, "Demo container (March)", &input, &result)
        .await?;

    info!("Seeded 1 saved calculation");
    Ok(())
}
