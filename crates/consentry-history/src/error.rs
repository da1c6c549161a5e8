//! History store error types.

use thiserror::Error;

/// Errors raised by the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No record exists under the given filename.
    #[error("no history record named '{filename}'")]
    NotFound {
        /// Requested record filename
        filename: String,
    },

    /// The record exists but cannot be parsed.
    #[error("history record '{filename}' is corrupt: {reason}")]
    Corrupt {
        /// Record filename
        filename: String,
        /// Parse failure detail
        reason: String,
    },

    /// The filename is not a valid record key.
    #[error("invalid history filename '{filename}'")]
    InvalidFilename {
        /// Rejected filename
        filename: String,
    },

    /// Failed to serialize a session for storage.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error against the underlying store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
