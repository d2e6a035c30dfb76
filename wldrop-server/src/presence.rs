//! Active drop gauge shown by `/health`.

use std::sync::atomic::{AtomicUsize, Ordering};

use wldrop_core::collaborators::ActivityTracker;

#[derive(Debug, Default)]
pub struct ActiveDropGauge {
    active: AtomicUsize,
}

impl ActiveDropGauge {
    pub fn get(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

impl ActivityTracker for ActiveDropGauge {
    fn drop_opened(&self) {
        let active = self.active.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(active_drops = active, "Presence updated");
    }

    fn drop_closed(&self) {
        let previous = self
            .active
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .unwrap_or(0);
        tracing::info!(active_drops = previous.saturating_sub(1), "Presence updated");
    }
}
