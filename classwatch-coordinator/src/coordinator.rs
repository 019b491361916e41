//! The per-account polling coordinator.

use chrono::{DateTime, Utc};
use classwatch_client::{AccountCredentials, ProgressSource, Reauthorizing, Session};
use classwatch_core::{Member, ProgressSnapshot};
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{info, instrument};

use crate::error::CoordinatorError;

/// Owns one account's session and republishes normalized snapshots.
///
/// The refresh cycle is: drive the re-authenticating source, rebuild the
/// whole snapshot mapping from the fetched graph, commit it, notify
/// subscribers. On failure the previous snapshot is retained.
///
/// Refreshes for the same account never run concurrently: the source sits
/// behind an async mutex, so re-auth-then-replay is atomic with respect to
/// any other refresh attempt.
pub struct Coordinator {
    account_id: String,
    source: Mutex<Box<dyn ProgressSource>>,
    /// Last fetched member graph, retained for calendar window queries
    /// that need per-session data the snapshot does not carry.
    members: RwLock<Vec<Member>>,
    snapshot_tx: watch::Sender<ProgressSnapshot>,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
}

impl Coordinator {
    /// Establishes one authenticated session and returns a ready
    /// coordinator with an empty snapshot.
    ///
    /// # Errors
    ///
    /// - [`CoordinatorError::AuthFailed`] if credentials are rejected
    /// - [`CoordinatorError::ConnectionFailed`] if the instance is
    ///   unreachable or not a course-progress instance
    #[instrument(skip(credentials), fields(account = %account_id))]
    pub async fn create(
        account_id: String,
        credentials: AccountCredentials,
    ) -> Result<Self, CoordinatorError> {
        let session = Session::create(credentials)
            .await
            .map_err(CoordinatorError::from_create)?;
        Ok(Self::with_source(account_id, Reauthorizing::new(session)))
    }

    /// Builds a coordinator over an arbitrary source. The source should
    /// already handle re-authentication; [`Coordinator::create`] composes
    /// the [`Reauthorizing`] wrapper for the real session.
    pub fn with_source(account_id: String, source: impl ProgressSource + 'static) -> Self {
        let (snapshot_tx, _) = watch::channel(ProgressSnapshot::new());
        Self {
            account_id,
            source: Mutex::new(Box::new(source)),
            members: RwLock::new(Vec::new()),
            snapshot_tx,
            last_refresh: RwLock::new(None),
        }
    }

    /// The account this coordinator polls.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Fetches fresh data and rebuilds the snapshot wholesale.
    ///
    /// # Errors
    ///
    /// - [`CoordinatorError::AuthExpired`] when the single
    ///   re-authentication attempt inside the source also failed
    /// - [`CoordinatorError::UpdateFailed`] on any other failure
    ///
    /// In both cases the previously committed snapshot stays available.
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn refresh(&self) -> Result<(), CoordinatorError> {
        let fetched = {
            let mut source = self.source.lock().await;
            source.refresh().await.map_err(CoordinatorError::from_refresh)?
        };

        let snapshot = ProgressSnapshot::from_members(&fetched);
        let member_count = snapshot.len();

        *self.members.write().await = fetched;
        *self.last_refresh.write().await = Some(Utc::now());
        self.snapshot_tx.send_replace(snapshot);

        info!(members = member_count, "Refresh committed");
        Ok(())
    }

    /// Returns the last committed snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribes to committed snapshots. Entities hold the receiver and
    /// re-read on change.
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Returns the last fetched member graph.
    pub async fn members(&self) -> Vec<Member> {
        self.members.read().await.clone()
    }

    /// When the last successful refresh committed, if any.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read().await
    }
}

// ============================================================================
// Tests
// ============================================================================
