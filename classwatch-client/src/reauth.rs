//! Re-authentication wrapper.
//!
//! Session tokens expire between refreshes. Rather than patching the
//! session's send path, the wrapper implements the same [`ProgressSource`]
//! interface and is composed around the session at construction time.

use async_trait::async_trait;
use classwatch_core::Member;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::session::ProgressSource;

/// Decorator that re-authenticates exactly once when a call fails with an
/// auth error, then replays the single failed call.
///
/// A second consecutive auth failure, or an auth failure during the
/// re-login itself, surfaces as [`ClientError::AuthExpired`]; the wrapper
/// never loops.
#[derive(Debug)]
pub struct Reauthorizing<S> {
    inner: S,
}

impl<S: ProgressSource> Reauthorizing<S> {
    /// Wraps a source.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: ProgressSource> ProgressSource for Reauthorizing<S> {
    async fn refresh(&mut self) -> Result<Vec<Member>, ClientError> {
        match self.inner.refresh().await {
            Ok(members) => Ok(members),
            Err(e) if e.is_auth() => {
                info!("Refresh rejected as unauthenticated, re-authenticating once");

                self.inner.reauthenticate().await.map_err(|re| {
                    warn!(error = %re, "Re-authentication failed");
                    if re.is_auth() {
                        ClientError::AuthExpired
                    } else {
                        re
                    }
                })?;

                self.inner.refresh().await.map_err(|re| {
                    if re.is_auth() {
                        warn!("Replayed call rejected again; credentials need attention");
                        ClientError::AuthExpired
                    } else {
                        re
                    }
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn reauthenticate(&mut self) -> Result<(), ClientError> {
        self.inner.reauthenticate().await
    }
}

// ============================================================================
// Tests
// ============================================================================
