//! Core error types for Classwatch.

use thiserror::Error;

/// Core error type for Classwatch operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A wire timestamp could not be interpreted.
    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The raw timestamp string from the backend.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
