//! Client error types.

use thiserror::Error;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-auth HTTP error status.
    #[error("HTTP error: status {status}")]
    Http {
        /// The response status code.
        status: u16,
    },

    /// Credentials or token were rejected (401/403).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Re-authentication was attempted once and also failed. Callers should
    /// surface a reauth-required condition rather than retry.
    #[error("Authentication expired; re-authentication failed")]
    AuthExpired,

    /// The instance could not be reached (connect error or timeout).
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The instance URL is not a valid base URL.
    #[error("Invalid instance URL: {0}")]
    InvalidInstance(String),

    /// The backend answered with something unexpected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns true for failures that one re-authentication may fix.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::AuthenticationFailed(_))
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Http { status } => Some(*status),
            ClientError::AuthenticationFailed(_) => Some(401),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Connect(format!("request timed out: {err}"))
        } else if err.is_connect() {
            ClientError::Connect(err.to_string())
        } else {
            ClientError::InvalidResponse(err.to_string())
        }
    }
}
