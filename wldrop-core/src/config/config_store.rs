//! Reloadable shared value.

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

/// A value read on every request and swapped wholesale on reload.
pub struct ConfigStore<T> {
    data: Arc<RwLock<T>>,
}

impl<T> ConfigStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            data: Arc::new(RwLock::new(initial)),
        }
    }

    /// Swap in a new value and hand back the one it replaced.
    pub async fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.data.write().await, value)
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, T> {
        self.data.read().await
    }
}

impl<T: Clone> ConfigStore<T> {
    /// Clone the current value out, releasing the lock immediately.
    pub async fn get(&self) -> T {
        self.data.read().await.clone()
    }
}

impl<T> Clone for ConfigStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
