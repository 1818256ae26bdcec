//! Store Module
//!
//! The contract the consensus engine consumes, and its SQLite-backed
//! implementation.
//!
//! ## Responsibilities
//! - Durable, index-addressed storage of consensus log entries
//! - Durable key-value area for replication metadata (term, vote, ...)
//! - Atomic batch appends and contiguous range deletion
//!
//! Both façades share one serialized SQLite session; see [`SqlStore`].

mod sqlite;

pub use sqlite::SqlStore;

use crate::entry::LogEntry;
use crate::error::Result;

/// Durable, range-truncatable storage of consensus log entries.
///
/// Indices are assigned by the caller; the store only guarantees that what
/// was written is read back faithfully and that batch writes are atomic.
pub trait LogStore {
    /// Smallest stored index, or `0` when the log is empty
    fn first_index(&self) -> Result<u64>;

    /// Largest stored index, or `0` when the log is empty
    fn last_index(&self) -> Result<u64>;

    /// Exact-match lookup. Fails with [`StoreError::LogNotFound`] when no
    /// entry exists at `index`.
    ///
    /// [`StoreError::LogNotFound`]: crate::StoreError::LogNotFound
    fn get_log(&self, index: u64) -> Result<LogEntry>;

    /// Store a single entry. Shares the batch path of [`store_logs`] so
    /// single and multi-entry writes carry the same atomicity guarantee.
    ///
    /// [`store_logs`]: LogStore::store_logs
    fn store_log(&self, entry: &LogEntry) -> Result<()>;

    /// Store all entries as one atomic unit; each is an upsert by index.
    /// Either every entry becomes visible or none do.
    fn store_logs(&self, entries: &[LogEntry]) -> Result<()>;

    /// Delete every entry with index in the inclusive range `[min, max]`.
    /// A range touching zero rows is a successful no-op.
    fn delete_range(&self, min: u64, max: u64) -> Result<()>;
}

/// Durable key-value storage for scalar replication metadata.
pub trait StableStore {
    /// Durably associate `value` with `key`, atomically replacing any
    /// prior value.
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Current value for `key`. Fails with [`StoreError::KeyNotFound`]
    /// when the key was never set — absence is an error, not an empty
    /// value.
    ///
    /// [`StoreError::KeyNotFound`]: crate::StoreError::KeyNotFound
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Store a counter as its 8-byte little-endian encoding
    fn set_u64(&self, key: &[u8], value: u64) -> Result<()>;

    /// Read a counter written by [`set_u64`]. Absent keys fail like
    /// [`get`]; a present value that is not exactly 8 bytes is an
    /// integrity fault.
    ///
    /// [`set_u64`]: StableStore::set_u64
    /// [`get`]: StableStore::get
    fn get_u64(&self, key: &[u8]) -> Result<u64>;
}
