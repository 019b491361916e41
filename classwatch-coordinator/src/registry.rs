//! The account registry.
//!
//! An explicit map from account id to coordinator, owned by the top-level
//! service and passed by reference to whatever needs lookup. Accounts are
//! inserted on setup and removed on unload; there is no process-global
//! state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::coordinator::Coordinator;

/// Registry of live coordinators, keyed by account id.
#[derive(Default)]
pub struct AccountRegistry {
    inner: RwLock<HashMap<String, Arc<Coordinator>>>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a coordinator under its account id, replacing any previous
    /// coordinator for the same account.
    pub async fn insert(&self, coordinator: Arc<Coordinator>) {
        let id = coordinator.account_id().to_string();
        debug!(account = %id, "Registering coordinator");
        self.inner.write().await.insert(id, coordinator);
    }

    /// Removes and returns the coordinator for an account.
    pub async fn remove(&self, id: &str) -> Option<Arc<Coordinator>> {
        debug!(account = %id, "Unregistering coordinator");
        self.inner.write().await.remove(id)
    }

    /// Looks up the coordinator for an account.
    pub async fn get(&self, id: &str) -> Option<Arc<Coordinator>> {
        self.inner.read().await.get(id).cloned()
    }

    /// Returns all registered account ids, sorted.
    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns all registered coordinators, sorted by account id.
    pub async fn all(&self) -> Vec<Arc<Coordinator>> {
        let guard = self.inner.read().await;
        let mut entries: Vec<(&String, &Arc<Coordinator>)> = guard.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, c)| Arc::clone(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use classwatch_client::{ClientError, ProgressSource};
    use classwatch_core::Member;

    struct Idle;

    #[async_trait]
    impl ProgressSource for Idle {
        async fn refresh(&mut self) -> Result<Vec<Member>, ClientError> {
            Ok(Vec::new())
        }

        async fn reauthenticate(&mut self) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn coordinator(id: &str) -> Arc<Coordinator> {
        Arc::new(Coordinator::with_source(id.to_string(), Idle))
    }

    #[tokio::test]
    async fn test_insert_get_remove_lifecycle() {
        let registry = AccountRegistry::new();

        registry.insert(coordinator("alice")).await;
        assert!(registry.get("alice").await.is_some());

        let removed = registry.remove("alice").await;
        assert!(removed.is_some());
        assert!(registry.get("alice").await.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_sorted() {
        let registry = AccountRegistry::new();
        registry.insert(coordinator("zoe")).await;
        registry.insert(coordinator("alice")).await;

        assert_eq!(registry.ids().await, vec!["alice", "zoe"]);
    }
}
