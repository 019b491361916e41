//! Credential validation for the setup flow.
//!
//! Setup is a single step: attempt one authenticated session and map the
//! failure onto the error key the form renders. On success the caller
//! persists the three credential fields verbatim as the account's
//! configuration entry.

use classwatch_client::{AccountCredentials, ClientError, Session};
use thiserror::Error;
use tracing::warn;

/// User-facing validation failures.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The URL does not point at a course-progress instance.
    #[error("The instance provided is invalid")]
    Connection,

    /// Username or password rejected.
    #[error("Invalid username or password")]
    Auth,

    /// Anything else.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SetupError {
    /// Stable key for rendering, e.g. as a form error id.
    pub fn error_key(&self) -> &'static str {
        match self {
            SetupError::Connection => "connection",
            SetupError::Auth => "auth",
            SetupError::Unknown(_) => "unknown",
        }
    }
}

impl From<ClientError> for SetupError {
    fn from(err: ClientError) -> Self {
        match err.status_code() {
            Some(404) => SetupError::Connection,
            Some(401) => SetupError::Auth,
            _ => SetupError::Unknown(err.to_string()),
        }
    }
}

/// Validates credentials by attempting one authenticated session.
///
/// # Errors
///
/// Returns a [`SetupError`] keyed `connection` / `auth` / `unknown`.
pub async fn validate_credentials(credentials: AccountCredentials) -> Result<(), SetupError> {
    match Session::create(credentials).await {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(error = %e, "Credential validation failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_instance_maps_to_connection() {
        let err = SetupError::from(ClientError::Http { status: 404 });
        assert_eq!(err.error_key(), "connection");
    }

    #[test]
    fn test_bad_credentials_map_to_auth() {
        let err = SetupError::from(ClientError::AuthenticationFailed("no".to_string()));
        assert_eq!(err.error_key(), "auth");
    }

    #[test]
    fn test_everything_else_maps_to_unknown() {
        assert_eq!(
            SetupError::from(ClientError::Http { status: 500 }).error_key(),
            "unknown"
        );
        assert_eq!(
            SetupError::from(ClientError::Connect("refused".to_string())).error_key(),
            "unknown"
        );
    }
}
