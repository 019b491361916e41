//! Authenticated sessions against one instance.

use async_trait::async_trait;
use classwatch_core::Member;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ClientError;

// ============================================================================
// Credentials
// ============================================================================

/// The three fields that identify one account on one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    /// Base URL of the course-progress instance.
    pub instance: String,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
}

// ============================================================================
// Progress Source
// ============================================================================

/// A source of the member/class graph.
///
/// The trait is the seam between the coordinator and the network: the
/// concrete [`Session`] implements it, the [`Reauthorizing`] wrapper
/// decorates it, and tests substitute scripted fakes.
///
/// Methods take `&mut self`: one account has exactly one session, and an
/// exclusive borrow keeps re-authentication atomic with respect to any
/// in-flight call on the same session.
///
/// [`Reauthorizing`]: crate::reauth::Reauthorizing
#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Fetches a fresh member/class graph.
    async fn refresh(&mut self) -> Result<Vec<Member>, ClientError>;

    /// Re-runs the login and replaces the session token in place.
    async fn reauthenticate(&mut self) -> Result<(), ClientError>;
}

// ============================================================================
// Session
// ============================================================================

/// An authenticated session: credentials plus the current access token.
#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    credentials: AccountCredentials,
    token: String,
}

impl Session {
    /// Establishes one authenticated session against the instance.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthenticationFailed`] if credentials are rejected
    /// - [`ClientError::Http`] with status 404 if the URL is not an instance
    /// - [`ClientError::Connect`] if the instance is unreachable
    #[instrument(skip(credentials), fields(instance = %credentials.instance))]
    pub async fn create(credentials: AccountCredentials) -> Result<Self, ClientError> {
        let api = ApiClient::new(&credentials.instance)?;
        let token = api
            .login(&credentials.username, &credentials.password)
            .await?;

        debug!("Session established");
        Ok(Self {
            api,
            credentials,
            token,
        })
    }
}

#[async_trait]
impl ProgressSource for Session {
    async fn refresh(&mut self) -> Result<Vec<Member>, ClientError> {
        self.api.fetch_members(&self.token).await
    }

    async fn reauthenticate(&mut self) -> Result<(), ClientError> {
        self.token = self
            .api
            .login(&self.credentials.username, &self.credentials.password)
            .await?;
        debug!("Session re-authenticated");
        Ok(())
    }
}
