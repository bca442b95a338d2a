//! contexq Host
//!
//! Serves the dashboard UI and tells it where the analytics API lives.
//!
//! Run with: cargo run --bin contexq
//!
//! # Configuration
//!
//! Loaded from `contexq.toml` (see `contexq-cli config`), then overridden by
//! environment variables:
//! - `CONTEXQ_API_URL`: analytics API origin (default: http://localhost:8000)
//! - `CONTEXQ_HOST` / `CONTEXQ_PORT`: bind address (default: 0.0.0.0:3000)
//! - `CONTEXQ_DIST_DIR`: built UI bundle (default: ./contexq-ui/dist)
//! - `CONTEXQ_LOG_LEVEL` / `CONTEXQ_LOG_FORMAT`, or `RUST_LOG`

use contexq::config::Config;
use contexq::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    logging::init(&config.logging);

    tracing::info!("Starting contexq v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Serving UI bundle from {}", config.server.dist_dir);

    server::serve(&config).await?;
    Ok(())
}
