//! # Repository Module
//!
//! Database repository implementations for Importa.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Admin API layer                                                       │
//! │       │                                                                 │
//! │       │  db.batches().list(tenant_id, 50)                              │
//! │       ▼                                                                 │
//! │  BatchRepository                                                       │
//! │  ├── insert(&self, batch)                                              │
//! │  ├── update(&self, batch)                                              │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list(&self, tenant_id, limit)                                     │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • The pure core stays free of persistence details                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod batch;
pub mod calculation;
