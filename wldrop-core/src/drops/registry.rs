//! Process-wide map of active drops.
//!
//! Membership changes take the write lock; lookups share the read lock and
//! never hold it across a drop's own mutex.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::ids::DropId;
use super::state::DropHandle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("drop {0} is already registered")]
    AlreadyRegistered(DropId),
}

#[derive(Debug, Default)]
pub struct DropRegistry {
    drops: RwLock<HashMap<DropId, Arc<DropHandle>>>,
}

impl DropRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, drop: Arc<DropHandle>) -> Result<(), RegistryError> {
        let mut drops = self.drops.write().await;
        if drops.contains_key(drop.id()) {
            return Err(RegistryError::AlreadyRegistered(drop.id().clone()));
        }
        drops.insert(drop.id().clone(), drop);
        Ok(())
    }

    /// Remove a drop. Only the first call for an id returns it.
    pub async fn unregister(&self, id: &DropId) -> Option<Arc<DropHandle>> {
        self.drops.write().await.remove(id)
    }

    pub async fn get(&self, id: &DropId) -> Option<Arc<DropHandle>> {
        self.drops.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &DropId) -> bool {
        self.drops.read().await.contains_key(id)
    }

    /// Handles of every active drop at this instant.
    pub async fn snapshot(&self) -> Vec<Arc<DropHandle>> {
        self.drops.read().await.values().cloned().collect()
    }

    /// Visit every active drop. The registry is not locked while `f` runs.
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Arc<DropHandle>),
    {
        for drop in self.snapshot().await {
            f(&drop);
        }
    }

    pub async fn count(&self) -> usize {
        self.drops.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drops::entry_set::EntrySet;
    use crate::drops::state::{DropSettings, DropState, tests::config};
    use crate::entities::DropKind;

    fn handle(id: &str) -> Arc<DropHandle> {
        let settings = DropSettings {
            id: DropId::from(id),
            config: config(DropKind::Raffle, 1, 0),
        };
        Arc::new(DropHandle::new(settings, DropState::new(EntrySet::new(None))))
    }

    #[tokio::test]
    async fn test_register_and_unregister_once() {
        let registry = DropRegistry::new();
        registry.register(handle("10")).await.unwrap();
        assert_eq!(
            registry.register(handle("10")).await,
            Err(RegistryError::AlreadyRegistered(DropId::from("10")))
        );
        registry.register(handle("11")).await.unwrap();
        assert_eq!(registry.count().await, 2);

        let id = DropId::from("10");
        assert!(registry.unregister(&id).await.is_some());
        assert!(registry.unregister(&id).await.is_none());
        assert!(registry.get(&id).await.is_none());

        let mut seen = Vec::new();
        registry.for_each(|d| seen.push(d.id().clone())).await;
        assert_eq!(seen, vec![DropId::from("11")]);
    }
}
