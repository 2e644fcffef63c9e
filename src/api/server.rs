use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    services::{get_link, health, shorten},
    state::AppState,
};
use crate::config::Config;
use crate::shortener::Shortener;
use crate::storage::StorageClient;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(
    config_path: Option<PathBuf>,
    address: Option<SocketAddr>,
) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .map_err(|e| format!("Failed to load config: {}", e))?;

    info!(
        provider = ?config.storage.provider,
        bucket = %config.storage.bucket,
        "Initializing storage"
    );
    let storage = Arc::new(
        StorageClient::from_config(&config.storage)
            .map_err(|e| format!("Failed to initialize storage: {}", e))?,
    );

    let shortener = Shortener::new(storage.clone(), config.shortener.clone());

    // Command-line address wins over the config file
    let bind_addr = address.unwrap_or(config.server.bind_addr);

    let state = AppState::new(config, shortener, storage);

    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(bind_addr).await?;
    info!(address = %bind_addr, "linkbox API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Route table, shared with the integration tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/links", post(shorten))
        .route("/links/{code}", get(get_link))
        .route("/health", get(health))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
