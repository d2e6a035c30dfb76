//! Application state shared across all request handlers.

use std::sync::Arc;

use wldrop_core::collaborators::postgres::WalletDirectory;
use wldrop_core::processors::CompletionCoordinator;

use crate::presence::ActiveDropGauge;

/// Cheap to clone; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<CompletionCoordinator>,
    pub wallets: WalletDirectory,
    pub presence: Arc<ActiveDropGauge>,
    /// Verifies `Wldrop-Signature` on service API requests.
    pub service_secret: Arc<[u8]>,
}

impl AppState {
    pub fn new(
        coordinator: Arc<CompletionCoordinator>,
        wallets: WalletDirectory,
        presence: Arc<ActiveDropGauge>,
        service_secret: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            coordinator,
            wallets,
            presence,
            service_secret: service_secret.into(),
        }
    }
}
