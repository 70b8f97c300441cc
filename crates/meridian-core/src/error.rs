//! # Error Types
//!
//! The report error taxonomy shared across the workspace.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  Parameter validation (this crate)                                  │
//! │       └── InvalidParameter  ← rejected before any plan exists       │
//! │                                                                     │
//! │  Plan assembly (this crate)                                         │
//! │       └── QueryError        ← grouping/ordering defect, fail loudly │
//! │                                                                     │
//! │  Execution (meridian-db)                                            │
//! │       ├── StorageUnavailable ← store unreachable, pool timeout      │
//! │       └── QueryError         ← rejected SQL, row decode failure     │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `InvalidParameter` is caller error: surfaced as a rejected request,
//!    never retried automatically
//! 2. `StorageUnavailable` is retryable by the caller: every report is
//!    read-only and idempotent
//! 3. `QueryError` is a programming defect: it must fail loudly, never be
//!    masked by partial or empty results
//! 4. An empty result set is NOT an error - it is a valid empty sequence

use thiserror::Error;

/// Failures a report operation can surface.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Malformed or semantically invalid input.
    ///
    /// ## When This Occurs
    /// - `to_date` before `from_date`
    /// - a non-parseable date from the transport layer
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The underlying store is unreachable or timed out.
    ///
    /// ## When This Occurs
    /// - connection pool exhausted or closed
    /// - I/O failure talking to SQLite
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The assembled plan is structurally invalid, or its rows could not
    /// be decoded.
    ///
    /// ## When This Occurs
    /// - grouping/aggregation mismatch caught at assembly time
    /// - the store rejects the rendered SQL
    /// - a row column has an unexpected type
    #[error("Query error: {0}")]
    QueryError(String),
}

impl ReportError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        ReportError::InvalidParameter(msg.into())
    }

    /// Creates a `QueryError`.
    pub fn query(msg: impl Into<String>) -> Self {
        ReportError::QueryError(msg.into())
    }

    /// Creates a `StorageUnavailable` error.
    pub fn storage(msg: impl Into<String>) -> Self {
        ReportError::StorageUnavailable(msg.into())
    }
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
