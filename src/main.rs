use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use idemark_import::server::{self, ServerConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing();

    info!("Starting idemark-import");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    info!(host = %config.host, port = config.port, "Configuration loaded");

    server::serve(config).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
