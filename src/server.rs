//! Static Host
//!
//! Serves the built `contexq-ui` bundle, built with Axum.
//!
//! # Endpoints
//!
//! - `GET /config.json` - runtime settings for the UI (`{"api_url": ...}`)
//! - `GET /*` - files from the bundle directory; unknown paths fall back to
//!   `index.html` so client routes like `/customers/7` deep-link

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::Config;

/// What the UI reads at start-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeConfig {
    pub api_url: String,
}

/// Shared state for the host routes
#[derive(Debug, Clone)]
pub struct HostState {
    pub runtime: RuntimeConfig,
    pub dist_dir: PathBuf,
}

impl HostState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            runtime: RuntimeConfig {
                api_url: config.api.base_url().to_string(),
            },
            dist_dir: PathBuf::from(&config.server.dist_dir),
        }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the host router
pub fn build_router(state: HostState) -> Router {
    let assets = ServeDir::new(&state.dist_dir)
        .fallback(ServeFile::new(state.dist_dir.join("index.html")));

    Router::new()
        .route("/config.json", get(runtime_config))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

async fn runtime_config(State(state): State<Arc<HostState>>) -> Json<RuntimeConfig> {
    Json(state.runtime.clone())
}

/// Start the host and run until Ctrl+C / SIGTERM
pub async fn serve(config: &Config) -> Result<(), ServerError> {
    let state = HostState::from_config(config);
    check_bundle(&state.dist_dir);

    let router = build_router(state);
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("contexq listening on {}", addr);
    tracing::info!("UI talks to {}", config.api.base_url());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("contexq shut down gracefully");
    Ok(())
}

fn check_bundle(dist_dir: &Path) {
    if !dist_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html in {:?}; build the UI with `trunk build --release` in contexq-ui",
            dist_dir
        );
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
