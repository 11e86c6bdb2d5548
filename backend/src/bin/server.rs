//! Timeline HTTP Server Binary
//!
//! Main entry point for the timeline REST API. It loads the configuration
//! and the substance catalog, sets up the HTTP router and starts serving.
//!
//! # Usage
//!
//! ```bash
//! TIMELINE_CATALOG=data/substances.json cargo run --bin timeline-server
//! ```
//!
//! # Environment Variables
//!
//! - `TIMELINE_CONFIG`: Path of `timeline.toml` (default: searched)
//! - `TIMELINE_CATALOG`: Substance catalog JSON file (default: empty catalog)
//! - `TIMELINE_UTC_OFFSET_MINUTES`: Time zone of axis labels
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use journal_timeline::db::{SubstanceCatalog, SubstanceRepository};
use journal_timeline::http::{create_router, AppState};
use journal_timeline::TimelineConfig;

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

    info!("Starting timeline HTTP server");

    let config = TimelineConfig::load().context("Failed to load configuration")?;

    let catalog = match &config.server.catalog_path {
        Some(path) => SubstanceCatalog::from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => {
            warn!("No substance catalog configured, every ingestion will be skipped");
            SubstanceCatalog::new()
        }
    };
    info!("Catalog ready with {} substances", catalog.len());

    let repository: Arc<dyn SubstanceRepository> = Arc::new(catalog);
    let state = AppState::new(repository).with_options(config.options());

    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
