//! Herald CLI entry point.

use clap::Parser;
use herald_cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("HERALD_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| "herald=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Pick up BOT_TOKEN and friends from local env files
    match herald_core::env::load_dotenv() {
        Ok(Some(file)) => tracing::debug!("Loaded environment from {}", file),
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to read env file: {}", e),
    }

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the command
    run(cli).await
}
