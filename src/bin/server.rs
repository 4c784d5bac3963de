//! Ingestion server binary
//!
//! Run with: cargo run --bin docingest-server

use std::path::Path;

use docingest::{config::AppConfig, server::Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docingest=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = if Path::new(CONFIG_PATH).exists() {
        tracing::info!("loading configuration from {}", CONFIG_PATH);
        AppConfig::load(CONFIG_PATH)?
    } else {
        tracing::info!("no {} found, using defaults", CONFIG_PATH);
        AppConfig::default()
    };

    tracing::info!("  - fetch timeout: {}s", config.fetch.timeout_secs);
    tracing::info!("  - wrap width: {}", config.extraction.wrap_width);
    tracing::info!("  - dual pdf extraction: {}", config.extraction.dual_extraction);
    tracing::info!("  - blob archival: {}", config.storage.enabled);

    let server = Server::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /get_text - Extract text from a document URL or path");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
