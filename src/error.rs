//! Error types for raftstone
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for raftstone operations
///
/// Callers branch on `LogNotFound` and `KeyNotFound` to distinguish an
/// absent record from a genuine storage failure, so those variants are
/// never folded into the generic SQLite error.
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Not-found conditions (load-bearing for callers)
    // -------------------------------------------------------------------------
    #[error("log entry not found at index {0}")]
    LogNotFound(u64),

    #[error("requested key not found")]
    KeyNotFound,

    // -------------------------------------------------------------------------
    // Storage faults (propagated verbatim, never retried here)
    // -------------------------------------------------------------------------
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Integrity faults
    // -------------------------------------------------------------------------
    #[error("stored counter is {0} bytes, expected exactly 8")]
    CorruptCounter(usize),

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------
    #[error("store is closed")]
    Closed,
}
