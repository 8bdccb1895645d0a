//! Fleet Health HTTP Server Binary
//!
//! Loads the configured fleet data once, then serves the metrics API.
//!
//! # Usage
//!
//! ```bash
//! FLEET_DATA_DIR=./data cargo run --bin fleet-server
//! ```
//!
//! # Environment Variables
//!
//! - `FLEET_CONFIG`: Path to a `fleet.toml` (default: searched in `.`, `backend/`, `..`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `FLEET_DATA_DIR`: Directory holding the four CSV exports (default: data)
//! - `WEATHER_API_URL`: Weather archive endpoint
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use chrono::Utc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use fleet_health::config::AppConfig;
use fleet_health::http::{create_router, AppState};
use fleet_health::services::FleetSnapshot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Fleet Health HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Reading fleet data from {}", config.data.dir.display());

    // Start without data rather than refusing to serve; /v1/reload retries.
    let data_config = config.data.clone();
    let as_of = Utc::now().date_naive();
    let snapshot = match tokio::task::spawn_blocking(move || FleetSnapshot::load(&data_config, as_of))
        .await
        .context("Snapshot loading task panicked")?
    {
        Ok(snapshot) => {
            info!(
                "Fleet snapshot loaded: {} vessels, {} compliance records",
                snapshot.total_vessels(),
                snapshot.compliance().len()
            );
            Some(snapshot)
        }
        Err(e) => {
            error!("Failed to load fleet data: {}", e);
            None
        }
    };

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .context("Invalid bind address")?;

    let state = AppState::new(config, snapshot).context("Failed to create weather client")?;
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
