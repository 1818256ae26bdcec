//! Configuration for raftstone
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default database file name, appended to the data directory
pub const DEFAULT_DB_FILE: &str = "raftstone.db";

/// Configuration for a store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the database file. Created on open if missing.
    /// Internal structure:
    ///   {data_dir}/
    ///     └── raftstone.db     (SQLite database)
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`
    pub db_file: String,

    // -------------------------------------------------------------------------
    // SQLite Session Configuration
    // -------------------------------------------------------------------------
    /// How aggressively SQLite fsyncs on commit
    pub sync_mode: SyncMode,
}

/// SQLite `synchronous` pragma setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// fsync at every critical moment (safest, slowest)
    Full,

    /// fsync at the most important moments only
    Normal,
}

impl SyncMode {
    /// Pragma value as SQLite expects it
    pub(crate) fn as_pragma(self) -> &'static str {
        match self {
            SyncMode::Full => "FULL",
            SyncMode::Normal => "NORMAL",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./raftstone_data"),
            db_file: DEFAULT_DB_FILE.to_string(),
            sync_mode: SyncMode::Full,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path to the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (the store appends its own file name)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Override the database file name
    pub fn db_file(mut self, name: impl Into<String>) -> Self {
        self.config.db_file = name.into();
        self
    }

    /// Set the SQLite synchronous mode
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
