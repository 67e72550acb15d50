//! Error types for the PETZ core library.
//!
//! The engine operations themselves are total and never fail. Errors only
//! arise at the edges where text from outside is interpreted.

use thiserror::Error;

/// Top-level error type for PETZ core edge operations.
#[derive(Error, Debug)]
pub enum PetzError {
    /// An action request named something other than feed / play / sleep.
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PetzError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PetzError>;
