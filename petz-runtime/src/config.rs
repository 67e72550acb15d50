//! Configuration for the PETZ runtime.
//!
//! Maps directly to `petz.toml`. Every section and field has a default, so
//! an empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [tick]
//! interval_secs = 60
//!
//! [persistence]
//! backend = "sqlite"
//! path = "data/pet-state.db"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// Top-level PETZ configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetzConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Tick scheduling.
    #[serde(default)]
    pub tick: TickConfig,
    /// Snapshot persistence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl PetzConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `RuntimeError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| RuntimeError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error. `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Tick scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickConfig {
    /// Real seconds per simulated tick.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Persist the snapshot after every tick.
    #[serde(default = "default_true")]
    pub persist_on_tick: bool,
}

impl TickConfig {
    /// Tick interval as a [`Duration`]. Never zero.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            persist_on_tick: true,
        }
    }
}

/// Where snapshots are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite file on disk.
    #[default]
    Sqlite,
    /// Volatile in-process storage.
    Memory,
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// SQLite database path.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Key the companion is stored under.
    #[serde(default = "default_slot")]
    pub slot: String,
    /// Use WAL mode for concurrent reads.
    #[serde(default = "default_true")]
    pub wal_mode: bool,
    /// Store and verify a CRC-32 of each snapshot.
    #[serde(default = "default_true")]
    pub checksum_enabled: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            path: default_path(),
            slot: default_slot(),
            wal_mode: true,
            checksum_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_interval_secs() -> u64 { 60 }
fn default_path() -> PathBuf { PathBuf::from("data/pet-state.db") }
fn default_slot() -> String { "petState".to_string() }
