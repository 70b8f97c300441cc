//! # Report Store
//!
//! The five report operations, composed from the core's plan builders, the
//! execution adapter, and the result mapper.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  caller parameters                                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  meridian_core::reports::* ── SelectPlan (validated, inert)         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  executor::fetch_plan ─────── raw SqliteRows (single await point)   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  mapper::* ────────────────── Vec<record>, deterministic order      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! Each report reads its own point-in-time view; there is no transactional
//! consistency between two independent report calls. A caller that needs a
//! consistent joint view across reports takes a [`Snapshot`] and runs both
//! reports on it.

use meridian_core::{
    reports, CustomerProfit, DateRange, EmployeeActivity, EmployeeDelay, ProductPopularity,
    ProductReorder, ReportResult,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::report_error;
use crate::executor::fetch_plan;
use crate::mapper;

/// Read-only access to the five sales reports.
#[derive(Debug, Clone)]
pub struct ReportStore {
    pool: SqlitePool,
}

impl ReportStore {
    /// Creates a new ReportStore over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        ReportStore { pool }
    }

    /// Products by units sold in the window, best sellers first.
    pub async fn product_popularity(
        &self,
        range: &DateRange,
    ) -> ReportResult<Vec<ProductPopularity>> {
        debug!(from = %range.from_date, to = %range.to_date, "Popularity report");
        let plan = reports::product_popularity(range)?;
        let rows = fetch_plan(&self.pool, &plan).await?;
        rows.iter().map(mapper::product_popularity).collect()
    }

    /// Products at or below their reorder threshold, most urgent first.
    pub async fn products_to_reorder(&self) -> ReportResult<Vec<ProductReorder>> {
        debug!("Reorder report");
        let plan = reports::products_to_reorder()?;
        let rows = fetch_plan(&self.pool, &plan).await?;
        rows.iter().map(mapper::product_reorder).collect()
    }

    /// Discounted revenue per customer in the window, most profitable first.
    pub async fn customer_profit(&self, range: &DateRange) -> ReportResult<Vec<CustomerProfit>> {
        debug!(from = %range.from_date, to = %range.to_date, "Customer profit report");
        let plan = reports::customer_profit(range)?;
        let rows = fetch_plan(&self.pool, &plan).await?;
        rows.iter().map(mapper::customer_profit).collect()
    }

    /// Orders placed per employee in the window, busiest first.
    pub async fn employee_activity(
        &self,
        range: &DateRange,
    ) -> ReportResult<Vec<EmployeeActivity>> {
        debug!(from = %range.from_date, to = %range.to_date, "Employee activity report");
        let plan = reports::employee_activity(range)?;
        let rows = fetch_plan(&self.pool, &plan).await?;
        rows.iter().map(mapper::employee_activity).collect()
    }

    /// Mean shipment delay per employee in the window, slowest first.
    pub async fn employee_delays(&self, range: &DateRange) -> ReportResult<Vec<EmployeeDelay>> {
        debug!(from = %range.from_date, to = %range.to_date, "Employee delay report");
        let plan = reports::employee_delays(range)?;
        let rows = fetch_plan(&self.pool, &plan).await?;
        rows.iter().map(mapper::employee_delay).collect()
    }

    /// Opens a point-in-time snapshot for running several reports against
    /// one consistent view of the store.
    ///
    /// The snapshot holds a pooled connection until released or dropped.
    pub async fn snapshot(&self) -> ReportResult<Snapshot> {
        debug!("Opening report snapshot");
        let tx = self.pool.begin().await.map_err(report_error)?;
        Ok(Snapshot { tx })
    }
}

/// A consistent point-in-time view of the store.
///
/// All operations are reads; the underlying transaction is rolled back on
/// [`Snapshot::release`] (or on drop), so a snapshot can never leave state
/// behind.
pub struct Snapshot {
    tx: Transaction<'static, Sqlite>,
}

impl Snapshot {
    /// Popularity report over this snapshot.
    pub async fn product_popularity(
        &mut self,
        range: &DateRange,
    ) -> ReportResult<Vec<ProductPopularity>> {
        let plan = reports::product_popularity(range)?;
        let rows = fetch_plan(&mut *self.tx, &plan).await?;
        rows.iter().map(mapper::product_popularity).collect()
    }

    /// Reorder report over this snapshot.
    pub async fn products_to_reorder(&mut self) -> ReportResult<Vec<ProductReorder>> {
        let plan = reports::products_to_reorder()?;
        let rows = fetch_plan(&mut *self.tx, &plan).await?;
        rows.iter().map(mapper::product_reorder).collect()
    }

    /// Customer profit report over this snapshot.
    pub async fn customer_profit(
        &mut self,
        range: &DateRange,
    ) -> ReportResult<Vec<CustomerProfit>> {
        let plan = reports::customer_profit(range)?;
        let rows = fetch_plan(&mut *self.tx, &plan).await?;
        rows.iter().map(mapper::customer_profit).collect()
    }

    /// Employee activity report over this snapshot.
    pub async fn employee_activity(
        &mut self,
        range: &DateRange,
    ) -> ReportResult<Vec<EmployeeActivity>> {
        let plan = reports::employee_activity(range)?;
        let rows = fetch_plan(&mut *self.tx, &plan).await?;
        rows.iter().map(mapper::employee_activity).collect()
    }

    /// Employee delay report over this snapshot.
    pub async fn employee_delays(&mut self, range: &DateRange) -> ReportResult<Vec<EmployeeDelay>> {
        let plan = reports::employee_delays(range)?;
        let rows = fetch_plan(&mut *self.tx, &plan).await?;
        rows.iter().map(mapper::employee_delay).collect()
    }

    /// Releases the snapshot, returning its connection to the pool.
    pub async fn release(self) -> ReportResult<()> {
        self.tx.rollback().await.map_err(report_error)
    }
}
