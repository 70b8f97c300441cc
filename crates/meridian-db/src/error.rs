//! # Database Error Types
//!
//! Setup errors for pool/migration work, and the mapping from raw sqlx
//! errors into the report taxonomy.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  Pool creation / migrations                                         │
//! │       └── DbError (this module): ConnectionFailed, MigrationFailed  │
//! │                                                                     │
//! │  Report execution (sqlx::Error)                                     │
//! │       └── report_error() classifies:                                │
//! │            pool timeout, closed pool, I/O → StorageUnavailable      │
//! │            rejected SQL, decode failure   → QueryError              │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use meridian_core::ReportError;
use thiserror::Error;

/// Failures while standing the database up.
///
/// Report execution does not use these: once a pool exists, report
/// operations speak [`ReportError`] exclusively.
#[derive(Debug, Error)]
pub enum DbError {
    /// Pool could not be created or the database file is unusable.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Embedded migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database setup operations.
pub type DbResult<T> = Result<T, DbError>;

/// Classifies an execution-time sqlx error into the report taxonomy.
///
/// ## Mapping
/// ```text
/// PoolTimedOut / PoolClosed / WorkerCrashed / Io  → StorageUnavailable
/// everything else (rejected SQL, decode, …)       → QueryError
/// ```
///
/// `QueryError` is the deliberate default: an unclassified failure is
/// treated as a defect and fails loudly rather than inviting a retry.
pub(crate) fn report_error(err: sqlx::Error) -> ReportError {
    match err {
        sqlx::Error::PoolTimedOut => ReportError::storage("connection pool exhausted"),
        sqlx::Error::PoolClosed => ReportError::storage("connection pool is closed"),
        sqlx::Error::WorkerCrashed => ReportError::storage("database worker crashed"),
        sqlx::Error::Io(e) => ReportError::storage(e.to_string()),
        other => ReportError::query(other.to_string()),
    }
}
