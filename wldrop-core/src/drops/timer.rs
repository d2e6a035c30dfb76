//! Per-drop expiry countdown.
//!
//! Firing only *requests* completion by posting [`DropExpired`]; the
//! coordinator's phase guard decides whether anything happens.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ids::DropId;
use crate::events::{DropExpired, ExpirySender};
use crate::utils::deadline::remaining_until;

/// Arms countdowns that report to one expiry channel.
#[derive(Clone)]
pub struct ExpiryTimer {
    expiry_tx: ExpirySender,
}

/// A live countdown. Dropping the handle cancels it.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl ExpiryTimer {
    pub fn new(expiry_tx: ExpirySender) -> Self {
        Self { expiry_tx }
    }

    /// Fire once `deadline` is reached; immediately if it already passed.
    pub fn arm_at(&self, drop_id: DropId, deadline: time::OffsetDateTime) -> TimerHandle {
        let remaining = remaining_until(deadline, time::OffsetDateTime::now_utc());
        self.arm(drop_id, remaining)
    }

    /// Fire after `remaining`.
    pub fn arm(&self, drop_id: DropId, remaining: std::time::Duration) -> TimerHandle {
        let expiry_tx = self.expiry_tx.clone();
        debug!(%drop_id, remaining_secs = remaining.as_secs(), "Arming expiry timer");

        let task = tokio::spawn(async move {
            tokio::time::sleep(remaining).await;
            debug!(%drop_id, "Expiry timer fired");
            if let Err(e) = expiry_tx.send(DropExpired { drop_id }).await {
                warn!(
                    drop_id = %e.0.drop_id,
                    "Failed to send DropExpired, receiver dropped"
                );
            }
        });

        TimerHandle { task }
    }
}

impl TimerHandle {
    /// Prevent a future fire. No effect if it already fired.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
