//! Snapshot store error types.
//!
//! These never cross the engine boundary: the store's public API swallows
//! them and falls back to defaults, per the persistence contract. They exist
//! so the store can log precisely what went wrong.

use thiserror::Error;

/// Errors that can occur reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot file could not be read or written.
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file held malformed JSON.
    #[error("snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns `true` for a plain missing-file miss, which is expected on
    /// first run and not worth a warning.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
