//! ExpiryWatcher processor.
//!
//! Receives `DropExpired` events from armed timers and hands them to the
//! [`CompletionCoordinator`]. Each completion runs on its own task so a slow
//! notification for one drop never delays the deadline of another. Those
//! tasks are awaited before the watcher returns.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::coordinator::CompletionCoordinator;
use crate::events::ExpiryReceiver;

pub struct ExpiryWatcher {
    coordinator: Arc<CompletionCoordinator>,
    expiry_rx: ExpiryReceiver,
    shutdown_rx: watch::Receiver<bool>,
}

impl ExpiryWatcher {
    pub fn new(
        coordinator: Arc<CompletionCoordinator>,
        expiry_rx: ExpiryReceiver,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            coordinator,
            expiry_rx,
            shutdown_rx,
        }
    }

    /// Run until shutdown or until every timer sender is gone.
    ///
    /// Timers still pending at shutdown are re-armed by the next resume.
    pub async fn run(mut self) {
        info!("ExpiryWatcher started");
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                biased;

                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("ExpiryWatcher received shutdown signal");
                        break;
                    }
                }

                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Expiry task failed");
                    }
                }

                Some(event) = self.expiry_rx.recv() => {
                    debug!(drop_id = %event.drop_id, "Received DropExpired");
                    let coordinator = Arc::clone(&self.coordinator);
                    in_flight.spawn(async move {
                        coordinator.on_expired(&event.drop_id).await;
                    });
                }

                else => {
                    info!("DropExpired channel closed");
                    break;
                }
            }
        }

        if !in_flight.is_empty() {
            info!(pending = in_flight.len(), "Waiting for expiring drops to finish");
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Expiry task failed");
            }
        }

        info!("ExpiryWatcher shutdown complete");
    }
}
