mod awards;
mod catalog;
mod config;
mod db;
mod discovery;
mod errors;
mod history;
mod identity;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::awards::PgAwardStore;
use crate::catalog::OpenLibraryClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::discovery::ThreadRngSampler;
use crate::history::PgInteractionStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bookswipe API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize catalog client
    let catalog = OpenLibraryClient::new(
        &config.catalog_base_url,
        Duration::from_secs(config.catalog_timeout_secs),
    )?;
    info!("Catalog client initialized ({})", config.catalog_base_url);
    info!(
        "Discovery: up to {} attempts per request, default genre '{}'",
        config.discovery_max_attempts, config.default_genre
    );

    let shutdown = CancellationToken::new();

    // Build app state
    let state = AppState {
        catalog: Arc::new(catalog),
        history: Arc::new(PgInteractionStore::new(db.clone())),
        awards: Arc::new(PgAwardStore::new(db)),
        sampler: Arc::new(ThreadRngSampler),
        config: config.clone(),
        shutdown: shutdown.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C and cancels in-flight discovery loops.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
