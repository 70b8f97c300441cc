//! # Execution Adapter
//!
//! Runs an assembled [`SelectPlan`] against the relational store and
//! returns raw rows. Owns no report semantics: the plan says what to run,
//! the mapper says what the rows mean.
//!
//! ## Contract
//! - No automatic retries. Every report is read-only and idempotent, so the
//!   caller decides on retry policy.
//! - Generic over [`sqlx::Executor`], so the same code path serves the pool
//!   and a snapshot transaction.
//! - Cancellation: dropping the returned future cancels the in-flight query
//!   at the sqlx boundary; the pooled connection is released on every exit
//!   path, including cancellation and errors.

use meridian_core::{BindValue, ReportResult, SelectPlan};
use sqlx::sqlite::SqliteRow;
use sqlx::Sqlite;
use tracing::debug;

use crate::error::report_error;

/// Executes `plan` and returns its raw rows.
///
/// Bind values are applied in placeholder order, exactly as the plan
/// recorded them.
pub async fn fetch_plan<'c, E>(executor: E, plan: &SelectPlan) -> ReportResult<Vec<SqliteRow>>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    let sql = plan.sql();
    debug!(sql = %sql, binds = plan.binds().len(), "Executing report plan");

    let mut query = sqlx::query(&sql);
    for bind in plan.binds() {
        query = match bind {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Real(v) => query.bind(*v),
            BindValue::Text(v) => query.bind(v.clone()),
            BindValue::Date(v) => query.bind(*v),
        };
    }

    let rows = query.fetch_all(executor).await.map_err(report_error)?;

    debug!(count = rows.len(), "Report plan returned rows");
    Ok(rows)
}
