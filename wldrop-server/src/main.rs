//! Whitelist drop coordinator server.
//!
//! Runs the drop lifecycle behind a signed HTTP API and talks to the chat
//! gateway for announcements and notifications.

mod api;
mod config;
mod gateway;
mod presence;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, get_database_url};
use gateway::HttpGateway;
use presence::ActiveDropGauge;
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wldrop_core::collaborators::postgres::{PgDropStore, WalletDirectory};
use wldrop_core::config::ConfigStore;
use wldrop_core::drops::{DropRegistry, ExpiryTimer};
use wldrop_core::events::expiry_channel;
use wldrop_core::framework::DatabaseProcessor;
use wldrop_core::processors::{Collaborators, CompletionCoordinator, ExpiryWatcher, ResumeManager};
use wldrop_sdk::client::GatewayClient;

/// Whitelist drop coordinator
#[derive(Parser, Debug)]
#[command(name = "wldrop-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./wldrop-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run database migrations on startup
    #[arg(long, default_value = "false")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting wldrop-server v{}", env!("CARGO_PKG_VERSION"));

    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let database_url = get_database_url().map_err(|e| {
        tracing::error!("DATABASE_URL environment variable not set");
        e
    })?;

    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;
    tracing::info!("Database connection established");

    if args.migrate {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;
        tracing::info!("Migrations completed successfully");
    }

    let db = DatabaseProcessor::new(db_pool.clone());
    let wallets = WalletDirectory::new(db.clone());

    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(
            loaded_config.gateway.timeout_secs,
        ))
        .build()?;
    let gateway = Arc::new(HttpGateway::new(
        GatewayClient::new(
            loaded_config.gateway.base_url.clone(),
            loaded_config.gateway.secret.clone(),
        )
        .with_http_client(http_client),
        wallets.clone(),
    ));
    let presence = Arc::new(ActiveDropGauge::default());
    let policy_store = ConfigStore::new(loaded_config.policy);

    let (expiry_tx, expiry_rx) = expiry_channel();
    let coordinator = Arc::new(CompletionCoordinator::new(
        Arc::new(DropRegistry::new()),
        Collaborators {
            transport: gateway.clone(),
            gate: Arc::new(wallets.clone()),
            store: Arc::new(PgDropStore::new(db)),
            notifier: gateway,
            activity: presence.clone(),
        },
        ExpiryTimer::new(expiry_tx),
        policy_store.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let watcher = tokio::spawn(
        ExpiryWatcher::new(coordinator.clone(), expiry_rx, shutdown_rx).run(),
    );

    // Resume before serving so no signal reaches a half-restored registry.
    let report = ResumeManager::new(coordinator.clone()).resume_all().await?;
    tracing::info!(
        resumed = report.resumed,
        completed = report.completed,
        orphaned = report.orphaned,
        skipped = report.skipped,
        "Persisted drops restored"
    );

    let reload_notify = spawn_config_reload_handler(config_loader, policy_store);

    let state = AppState::new(
        coordinator.clone(),
        wallets,
        presence,
        loaded_config.service_secret,
    );
    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", loaded_config.listen);
    let result = run_server(router, loaded_config.listen).await;

    // Active drops keep their records; the next start resumes them.
    let _ = shutdown_tx.send(true);
    reload_notify.notify_one();
    if let Err(e) = watcher.await {
        tracing::warn!(error = %e, "Expiry watcher task failed");
    }
    // Completions started by requests the server already dropped.
    coordinator.drain().await;

    tracing::info!("Closing database connections...");
    db_pool.close().await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
