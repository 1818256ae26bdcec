//! Log entry definitions
//!
//! Defines the record the consensus engine writes and reads back. The
//! store never interprets `kind` or `data`; both round-trip unchanged.

/// A single consensus log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Position in the log, assigned by the consensus engine
    pub index: u64,

    /// Term under which the entry was produced
    pub term: u64,

    /// Semantic kind of the entry (command, config change, no-op, ...),
    /// opaque to the store
    pub kind: u8,

    /// Opaque payload
    pub data: Vec<u8>,
}

impl LogEntry {
    /// Create an entry with the given position and term
    pub fn new(index: u64, term: u64, kind: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            index,
            term,
            kind,
            data: data.into(),
        }
    }
}
