// Main entry point for the directory server

use std::sync::Arc;

use anyhow::{Context, Result};
use directory_core::domains::engagement::ClientSession;
use directory_core::kernel::{FileClientStorage, ServerDeps};
use directory_core::server::{build_app, AppState};
use directory_core::{Config, Directory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,directory_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting creator directory server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(rollback_policy = %config.rollback_policy, "Configuration loaded");

    // Connect to the hosted backend and load every collection
    let deps = ServerDeps::from_config(&config).context("Failed to build backend clients")?;
    let directory = Directory::load(deps)
        .await
        .context("Failed to load directory")?;

    // Visitor session state
    let storage = FileClientStorage::open(&config.client_state_path)
        .context("Failed to open client state")?;
    let session = ClientSession::load(Arc::new(storage), config.daily_unlock_limit)
        .context("Failed to load client session")?;

    let app = build_app(AppState::new(directory, session));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
