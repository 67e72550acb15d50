//! Error types for the PETZ runtime.

use thiserror::Error;

/// Top-level error type for runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Error bubbled up from the core crate.
    #[error(transparent)]
    Core(#[from] petz_core::PetzError),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, RuntimeError>;
