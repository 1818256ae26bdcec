//! # raftstone
//!
//! A durable SQLite-backed storage backend for a consensus replication
//! log, providing:
//! - An append-only log store with random-access reads and range deletion
//! - A stable store for scalar replication metadata (term, vote, config)
//! - Atomic batch appends via SQLite transactions
//! - A single serialized connection as the concurrency model
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Consensus Engine                           │
//! └───────────┬─────────────────────────────────┬───────────────┘
//!             │                                 │
//! ┌───────────▼───────────┐         ┌───────────▼───────────┐
//! │       LogStore        │         │      StableStore      │
//! │ (entries by index)    │         │  (metadata by key)    │
//! └───────────┬───────────┘         └───────────┬───────────┘
//!             │                                 │
//!             └───────────────┬─────────────────┘
//!                             ▼
//!                   ┌──────────────────┐
//!                   │     SqlStore     │
//!                   │ (one connection, │
//!                   │  r_log, r_store) │
//!                   └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entry;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, SyncMode};
pub use entry::LogEntry;
pub use error::{Result, StoreError};
pub use store::{LogStore, SqlStore, StableStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of raftstone
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
