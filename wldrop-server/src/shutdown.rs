//! Signal handling for graceful shutdown and policy reload.

use crate::config::ConfigLoader;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::Notify;
use wldrop_core::config::{ConfigStore, DropPolicy};

/// Completes when SIGTERM or SIGINT (Ctrl+C) is received.
pub async fn shutdown_signal() {
    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "Failed to install signal handlers, waiting for Ctrl+C");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}

/// Spawns a task that re-reads the config file on SIGHUP and publishes the
/// new drop policy. Listen address and secrets stay as started.
///
/// Notify the returned handle to stop the task.
pub fn spawn_config_reload_handler(
    config_loader: Arc<ConfigLoader>,
    policy_store: ConfigStore<DropPolicy>,
) -> Arc<Notify> {
    let shutdown_notify = Arc::new(Notify::new());
    let shutdown_notify_clone = shutdown_notify.clone();

    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(sighup) => sighup,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGHUP handler, reload disabled");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    tracing::info!("Received SIGHUP, reloading configuration");
                    match config_loader.load() {
                        Ok(loaded) => {
                            let max_winner_count = loaded.policy.max_winner_count;
                            let default_duration = loaded.policy.default_duration;
                            let banned = loaded.policy.banlist.len();
                            let previous = policy_store.replace(loaded.policy).await;
                            tracing::info!(
                                max_winner_count,
                                %default_duration,
                                banned,
                                previously_banned = previous.banlist.len(),
                                "Drop policy reloaded"
                            );
                        }
                        Err(e) => {
                            tracing::error!("Failed to reload configuration: {}", e);
                        }
                    }
                }
                _ = shutdown_notify_clone.notified() => {
                    tracing::debug!("Config reload handler shutting down");
                    break;
                }
            }
        }
    });

    shutdown_notify
}
