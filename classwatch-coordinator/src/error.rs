//! Coordinator error types.

use classwatch_client::ClientError;
use thiserror::Error;

/// Errors surfaced by a coordinator. Nothing here is fatal to the process;
/// every failure is scoped to one account.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Credentials were rejected while establishing the session.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The instance could not be reached, or is not a course-progress
    /// instance at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A refresh failed even after the single re-authentication attempt.
    /// The stored credentials need attention; retrying will not help.
    #[error("Re-authentication required")]
    AuthExpired,

    /// A refresh failed for a non-auth reason. The previous snapshot is
    /// retained; the next scheduled refresh may succeed.
    #[error("Update failed: {0}")]
    UpdateFailed(String),
}

impl CoordinatorError {
    /// Classifies a session-establishment failure (spec: auth-failure vs
    /// connectivity-failure kinds).
    pub(crate) fn from_create(err: ClientError) -> Self {
        if err.is_auth() {
            CoordinatorError::AuthFailed(err.to_string())
        } else {
            CoordinatorError::ConnectionFailed(err.to_string())
        }
    }

    /// Classifies a refresh failure.
    pub(crate) fn from_refresh(err: ClientError) -> Self {
        match err {
            ClientError::AuthExpired => CoordinatorError::AuthExpired,
            other => CoordinatorError::UpdateFailed(other.to_string()),
        }
    }

    /// Returns true if the user has to fix credentials before the account
    /// can refresh again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            CoordinatorError::AuthExpired | CoordinatorError::AuthFailed(_)
        )
    }
}
