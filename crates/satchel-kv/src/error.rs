//! # Storage Error Types
//!
//! Error types for key-value storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (satchel-store) ← What engine callers see                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Key-value storage errors.
///
/// These errors wrap sqlx errors and provide additional context.
/// What to do about them (propagate, log and continue) is the caller's
/// policy: the engine treats a failed write as non-fatal, but a failed
/// read at load time as fatal.
#[derive(Debug, Error)]
pub enum KvError {
    /// Storage connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Migration version conflict
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to KvError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut   → KvError::PoolExhausted
/// sqlx::Error::PoolClosed     → KvError::ConnectionFailed
/// sqlx::Error::Database       → KvError::QueryFailed
/// Other                       → KvError::Internal
/// ```
impl From<sqlx::Error> for KvError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => KvError::PoolExhausted,
            sqlx::Error::PoolClosed => KvError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::Database(db_err) => KvError::QueryFailed(db_err.message().to_string()),
            _ => KvError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for KvError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        KvError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type KvResult<T> = Result<T, KvError>;
