//! Snapshot persistence for the companion.
//!
//! The latest [`FinalizedState`] is serialised to JSON and stored under a
//! named slot. The SQLite schema is intentionally simple:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pet_snapshots (
//!     slot       TEXT PRIMARY KEY,
//!     data       BLOB NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     checksum   TEXT
//! );
//! ```
//!
//! - JSON inside a BLOB column keeps the schema stable when fields change;
//!   loading goes through the normalizer, so old or partial records still load.
//! - Optional CRC-32 checksum detects save corruption.
//! - [`MemoryStore`] is the volatile fallback when no database can be opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use petz_core::{FinalizedState, RawState, finalize};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::{debug, info, warn};

use crate::config::{PersistenceConfig, StoreBackend};
use crate::error::{Result, RuntimeError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS pet_snapshots (
    slot       TEXT PRIMARY KEY,
    data       BLOB NOT NULL,
    updated_at TEXT NOT NULL,
    checksum   TEXT
);";

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

/// CRC-32 of `data` as a lowercase hex string.
fn crc32_hex(data: &[u8]) -> String {
    format!("{:08x}", crc32_compute(data))
}

/// Basic CRC-32 (ISO 3309 / ITU-T V.42) computation.
fn crc32_compute(data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

/// Somewhere a companion snapshot can be saved and loaded.
pub trait StateStore {
    /// Load the raw record stored under `slot`, if any.
    ///
    /// # Errors
    /// Returns an error if the backend fails or the stored bytes are not JSON.
    fn load(&self, slot: &str) -> Result<Option<RawState>>;

    /// Save (upsert) `state` under `slot`.
    ///
    /// # Errors
    /// Returns an error if encoding or the backend fails.
    fn save(&mut self, slot: &str, state: &FinalizedState) -> Result<()>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Load `slot` and finalize it, merging onto the baseline.
///
/// A missing slot yields the baseline companion. A store error is logged
/// and also yields the baseline, so a broken save never blocks startup.
pub fn load_or_default(store: &dyn StateStore, slot: &str) -> FinalizedState {
    match store.load(slot) {
        Ok(Some(raw)) => finalize(raw),
        Ok(None) => {
            info!(slot, backend = store.backend(), "No saved companion, starting fresh");
            finalize(RawState::default())
        }
        Err(e) => {
            warn!(slot, backend = store.backend(), error = %e, "Failed to load companion, starting fresh");
            finalize(RawState::default())
        }
    }
}

/// Open the store described by `config`.
///
/// If the SQLite database cannot be opened, a [`MemoryStore`] is returned
/// instead and a warning is logged.
pub fn open_store(config: &PersistenceConfig) -> Box<dyn StateStore + Send> {
    match config.backend {
        StoreBackend::Memory => Box::new(MemoryStore::new()),
        StoreBackend::Sqlite => match SqliteStore::open(&config.path, config) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(
                    path = %config.path.display(),
                    error = %e,
                    "Failed to open snapshot database, falling back to memory"
                );
                Box::new(MemoryStore::new())
            }
        },
    }
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Handle to an open SQLite database that stores companion snapshots.
///
/// # Usage
///
/// ```no_run
/// # use petz_runtime::persistence::{SqliteStore, StateStore};
/// # use petz_runtime::config::PersistenceConfig;
/// # use petz_core::{PetState, finalize};
/// let mut store = SqliteStore::open("pet-state.db", &PersistenceConfig::default())?;
/// store.save("petState", &finalize(PetState::default()))?;
/// let loaded = store.load("petState")?;
/// # Ok::<(), petz_runtime::error::RuntimeError>(())
/// ```
pub struct SqliteStore {
    conn: Connection,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) an SQLite database at `path`.
    ///
    /// Parent directories are created as needed. The schema is created if
    /// it does not exist. WAL mode is enabled when `config.wal_mode` is true.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Io`] if the directory cannot be created, or
    /// [`RuntimeError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(
            path = %db_path.display(),
            wal = config.wal_mode,
            "PETZ snapshot store opened"
        );

        Ok(Self {
            conn,
            config: config.clone(),
            db_path,
        })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn,
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Delete a slot. Returns `true` if a row was actually deleted.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Database`] on SQLite failures.
    pub fn delete(&self, slot: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM pet_snapshots WHERE slot = ?1", params![slot])?;
        Ok(deleted > 0)
    }

    /// List every stored slot.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Database`] on SQLite failures.
    pub fn list_slots(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT slot FROM pet_snapshots ORDER BY slot")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let slots = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(slots)
    }

    /// Path of the underlying database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

impl StateStore for SqliteStore {
    fn load(&self, slot: &str) -> Result<Option<RawState>> {
        let start = Instant::now();

        let mut stmt = self
            .conn
            .prepare_cached("SELECT data, checksum FROM pet_snapshots WHERE slot = ?1")?;
        let row: Option<(Vec<u8>, Option<String>)> = stmt
            .query_row(params![slot], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((data, stored_checksum)) = row else {
            return Ok(None);
        };

        if self.config.checksum_enabled {
            if let Some(ref expected) = stored_checksum {
                let actual = crc32_hex(&data);
                if *expected != actual {
                    warn!(
                        slot,
                        expected = %expected,
                        actual = %actual,
                        "Checksum mismatch, possible save corruption"
                    );
                }
            }
        }

        let raw: RawState =
            serde_json::from_slice(&data).map_err(|e| RuntimeError::Serialization(e.to_string()))?;

        debug!(
            slot,
            bytes = data.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Loaded companion snapshot"
        );

        Ok(Some(raw))
    }

    fn save(&mut self, slot: &str, state: &FinalizedState) -> Result<()> {
        let start = Instant::now();

        let json =
            serde_json::to_vec(state).map_err(|e| RuntimeError::Serialization(e.to_string()))?;
        let checksum = self.config.checksum_enabled.then(|| crc32_hex(&json));
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO pet_snapshots (slot, data, updated_at, checksum)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(slot) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at,
                checksum = excluded.checksum",
            params![slot, json, now, checksum],
        )?;

        debug!(
            slot,
            status = %state.state.status,
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Saved companion snapshot"
        );

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Volatile store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, serde_json::Value>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, slot: &str) -> Result<Option<RawState>> {
        Ok(self.slots.get(slot).map(RawState::from_value))
    }

    fn save(&mut self, slot: &str, state: &FinalizedState) -> Result<()> {
        let value =
            serde_json::to_value(state).map_err(|e| RuntimeError::Serialization(e.to_string()))?;
        self.slots.insert(slot.to_string(), value);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
