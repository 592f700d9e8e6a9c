//! Store error types.

use autoformat_core::DocumentError;
use thiserror::Error;

/// Errors raised while persisting or restoring editor content.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored blob is not a valid document.
    #[error("corrupt saved state: {0}")]
    Corrupt(String),

    /// A storage key cannot be mapped to a backend location.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

impl From<DocumentError> for StoreError {
    fn from(value: DocumentError) -> Self {
        Self::Corrupt(value.to_string())
    }
}
