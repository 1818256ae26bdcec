//! SQLite-backed store
//!
//! One database file, two relations: `r_log` for consensus log entries and
//! `r_store` for replication metadata. Everything runs through a single
//! serialized connection.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::config::Config;
use crate::entry::LogEntry;
use crate::error::{Result, StoreError};
use crate::store::{LogStore, StableStore};

// =============================================================================
// SQL
// =============================================================================

/// Idempotent schema bootstrap, safe against an already-initialized file.
/// The key index is UNIQUE so `SQL_SET` can be a true single-statement
/// upsert and "one current value per key" holds at the relation level.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS r_log (
        l_index INTEGER PRIMARY KEY,
        term BIGINT NOT NULL,
        type INTEGER NOT NULL,
        data BLOB
    )",
    "CREATE TABLE IF NOT EXISTS r_store (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key VARBINARY(512) NOT NULL,
        value BLOB NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS r_store_key_idx ON r_store(key)",
];

const SQL_FIRST_INDEX: &str = "SELECT COALESCE(MIN(l_index), 0) FROM r_log";
const SQL_LAST_INDEX: &str = "SELECT COALESCE(MAX(l_index), 0) FROM r_log";
const SQL_GET_LOG: &str = "SELECT term, type, data FROM r_log WHERE l_index = ?1";
const SQL_STORE_LOG: &str = "INSERT INTO r_log (l_index, term, type, data) \
     VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(l_index) DO UPDATE SET \
         term = excluded.term, type = excluded.type, data = excluded.data";
const SQL_DELETE_RANGE: &str = "DELETE FROM r_log WHERE l_index >= ?1 AND l_index <= ?2";
const SQL_SET: &str = "INSERT INTO r_store (key, value) VALUES (?1, ?2) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const SQL_GET: &str = "SELECT value FROM r_store WHERE key = ?1";

// =============================================================================
// SqlStore
// =============================================================================

/// SQLite-backed log store and stable store.
///
/// ## Concurrency Model: Single Logical Writer
///
/// One `Connection` behind a `Mutex` serializes every operation; the
/// single-writer guarantee is an invariant of this type, not a side effect
/// of driver configuration. Calls from multiple threads are safe and run
/// one at a time. The connection lives in an `Option` so [`close`] can
/// take it out, leaving later calls to fail with [`StoreError::Closed`].
///
/// [`close`]: SqlStore::close
pub struct SqlStore {
    /// Exclusive session to the backing database
    conn: Mutex<Option<Connection>>,

    /// Full path to the database file
    path: PathBuf,
}

impl SqlStore {
    /// Open or create a store with the given config.
    ///
    /// Creates the data directory if needed, configures the session for
    /// durability and exclusive access, and runs the schema bootstrap.
    pub fn open(config: Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let path = config.db_path();
        let conn = Connection::open(&path)?;

        // One store instance owns the file for its lifetime
        conn.pragma_update(None, "locking_mode", "EXCLUSIVE")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", config.sync_mode.as_pragma())?;

        for stmt in SCHEMA {
            conn.execute(stmt, [])?;
        }

        debug!(path = %path.display(), "opened store");

        Ok(Self {
            conn: Mutex::new(Some(conn)),
            path,
        })
    }

    /// Open with a data directory (convenience method)
    ///
    /// Uses default config with the specified directory
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().data_dir(path.as_ref()).build())
    }

    /// Full path to the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the session. Idempotent; every operation after the first
    /// `close` fails with [`StoreError::Closed`].
    pub fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock();
        match guard.take() {
            Some(conn) => {
                debug!(path = %self.path.display(), "closing store");
                conn.close().map_err(|(_, err)| StoreError::Sqlite(err))
            }
            None => Ok(()),
        }
    }

    /// Run a single-statement operation against the live connection
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        f(conn)
    }
}

impl LogStore for SqlStore {
    fn first_index(&self) -> Result<u64> {
        // COALESCE makes the empty log read 0 instead of NULL
        self.with_conn(|conn| {
            let idx: i64 = conn.query_row(SQL_FIRST_INDEX, [], |row| row.get(0))?;
            Ok(idx as u64)
        })
    }

    fn last_index(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let idx: i64 = conn.query_row(SQL_LAST_INDEX, [], |row| row.get(0))?;
            Ok(idx as u64)
        })
    }

    fn get_log(&self, index: u64) -> Result<LogEntry> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(SQL_GET_LOG, params![index as i64], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, u8>(1)?,
                        row.get::<_, Option<Vec<u8>>>(2)?,
                    ))
                })
                .optional()?;

            match row {
                Some((term, kind, data)) => Ok(LogEntry {
                    index,
                    term: term as u64,
                    kind,
                    data: data.unwrap_or_default(),
                }),
                None => Err(StoreError::LogNotFound(index)),
            }
        })
    }

    fn store_log(&self, entry: &LogEntry) -> Result<()> {
        self.store_logs(std::slice::from_ref(entry))
    }

    fn store_logs(&self, entries: &[LogEntry]) -> Result<()> {
        let mut guard = self.conn.lock();
        let conn = guard.as_mut().ok_or(StoreError::Closed)?;

        // All entries commit together; dropping the transaction on any
        // error path rolls every statement back before the error returns.
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(SQL_STORE_LOG)?;
            for entry in entries {
                stmt.execute(params![
                    entry.index as i64,
                    entry.term as i64,
                    entry.kind,
                    entry.data,
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_range(&self, min: u64, max: u64) -> Result<()> {
        self.with_conn(|conn| {
            let removed = conn.execute(SQL_DELETE_RANGE, params![min as i64, max as i64])?;
            debug!(min, max, removed, "deleted log range");
            Ok(())
        })
    }
}

impl StableStore for SqlStore {
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(SQL_SET, params![key, value])?;
            Ok(())
        })
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.with_conn(|conn| {
            conn.query_row(SQL_GET, params![key], |row| row.get(0))
                .optional()?
                .ok_or(StoreError::KeyNotFound)
        })
    }

    fn set_u64(&self, key: &[u8], value: u64) -> Result<()> {
        self.set(key, &value.to_le_bytes())
    }

    fn get_u64(&self, key: &[u8]) -> Result<u64> {
        let bytes = self.get(key)?;
        let raw: [u8; 8] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::CorruptCounter(bytes.len()))?;
        Ok(u64::from_le_bytes(raw))
    }
}
