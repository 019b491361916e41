//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// An account with the same id already exists.
    #[error("Account already configured: {0}")]
    DuplicateAccount(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
