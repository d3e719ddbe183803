//! Market API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p market-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use anyhow::Context;
use market_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Server failed to start");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    if let Err(e) = try_init_tracing(TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    market_api::run(config).await.context("Server error")?;

    Ok(())
}
