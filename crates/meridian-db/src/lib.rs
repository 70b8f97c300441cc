//! # meridian-db: Execution Layer for Meridian Reports
//!
//! This crate owns all database access for the Meridian reporting engine:
//! it executes the plans meridian-core assembles and maps raw rows into the
//! typed report records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Meridian Data Flow                             │
//! │                                                                     │
//! │  Routing layer (out of scope): validated DateRange                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  meridian-core: report builder → SelectPlan                         │
//! │       │                                                             │
//! │  ┌────▼────────────────────────────────────────────────────────┐   │
//! │  │                 meridian-db (THIS CRATE)                    │   │
//! │  │                                                             │   │
//! │  │   ┌──────────┐   ┌──────────┐   ┌──────────┐  ┌──────────┐ │   │
//! │  │   │   pool   │   │ executor │   │  mapper  │  │  store   │ │   │
//! │  │   │ SqlitePool│  │ run plan │   │ row →    │  │ 5 report │ │   │
//! │  │   │ + config │   │ + binds  │   │ record   │  │ ops      │ │   │
//! │  │   └──────────┘   └──────────┘   └──────────┘  └──────────┘ │   │
//! │  └────┬────────────────────────────────────────────────────────┘   │
//! │       ▼                                                             │
//! │  SQLite database (WAL, foreign keys on)                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Setup errors and sqlx error classification
//! - [`executor`] - Plan execution against any SQLite executor
//! - [`mapper`] - Raw row → typed record conversion
//! - [`store`] - The five report operations and snapshot transactions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meridian_core::DateRange;
//! use meridian_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./sales.db")).await?;
//! let range = DateRange::new(from, to)?;
//! let rows = db.reports().product_popularity(&range).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod executor;
pub mod mapper;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use store::{ReportStore, Snapshot};
