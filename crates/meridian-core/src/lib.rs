//! # meridian-core: Pure Reporting Logic for Meridian
//!
//! This crate is the **heart** of the Meridian reporting engine. It turns
//! typed report parameters into executable query plans, as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Meridian Report Pipeline                        │
//! │                                                                     │
//! │  Caller parameters (DateRange)                                      │
//! │       │                                                             │
//! │  ┌────▼────────────────────────────────────────────────────────┐   │
//! │  │               ★ meridian-core (THIS CRATE) ★                │   │
//! │  │                                                             │   │
//! │  │   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌────────┐  │   │
//! │  │   │  schema  │   │   plan   │   │ reports  │   │ error  │  │   │
//! │  │   │  tables  │   │ builder  │   │ 5 report │   │ report │  │   │
//! │  │   │  + FKs   │   │ + render │   │ builders │   │ kinds  │  │   │
//! │  │   └──────────┘   └──────────┘   └──────────┘   └────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                     │   │
//! │  └────┬────────────────────────────────────────────────────────┘   │
//! │       │ SelectPlan (SQL text + ordered binds)                      │
//! │  ┌────▼────────────────────────────────────────────────────────┐   │
//! │  │                meridian-db (Execution Layer)                │   │
//! │  │          SQLite pool, plan execution, row mapping           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`schema`] - Static descriptors of the sales schema (tables, FKs)
//! - [`plan`] - Query plan assembly and SQL rendering
//! - [`reports`] - The five report definitions and their output records
//! - [`error`] - The report error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: a report builder is deterministic - same
//!    parameters, same plan
//! 2. **No Execution Here**: plans are values; only meridian-db runs them
//! 3. **Deterministic Output**: every plan carries an explicit ordering with
//!    a primary-key tie-break, so report rows are reproducible across runs
//! 4. **Explicit Errors**: all failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod plan;
pub mod reports;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ReportError, ReportResult};
pub use plan::{BindValue, Direction, PlanBuilder, SelectPlan};
pub use reports::{
    CustomerProfit, DateRange, EmployeeActivity, EmployeeDelay, ProductPopularity, ProductReorder,
};
pub use schema::{sales_schema, Schema, TableDef};
