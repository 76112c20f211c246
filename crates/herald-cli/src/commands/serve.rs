//! Gateway server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use herald_channels::{ChannelStore, Distributor, TelegramSender};
use herald_core::Config;
use herald_gateway::{AppState, GatewayServer};

/// Serve command arguments.
#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to PORT or 5000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind (defaults to HERALD_HOST or 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Path to the channel registry file
    #[arg(long)]
    pub channels_file: Option<PathBuf>,
}

/// Run the gateway server.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(port) = args.port {
        config.gateway.port = port;
    }
    if let Some(host) = args.host {
        config.gateway.host = host;
    }
    if let Some(path) = args.channels_file {
        config.channels_file = path;
    }

    let bot_token = config.require_bot_token()?.to_string();
    let store = ChannelStore::new(&config.channels_file);
    info!("Channel registry: {}", store.path().display());

    // One-off token check at startup; broadcasts still open their own
    // session per dispatch.
    match TelegramSender::new(&bot_token).verify().await {
        Ok(username) => info!("Broadcasting as @{}", username),
        Err(e) => warn!("Bot token verification failed: {}", e),
    }

    let rewriter = match &config.rewrite {
        Some(settings) => {
            let rewriter = super::build_rewriter(settings)?;
            info!("Rewrite backend enabled");
            Some(Arc::new(rewriter))
        }
        None => {
            info!("Rewrite backend not configured (set OPENAI_API_KEY to enable)");
            None
        }
    };

    let distributor = Distributor::new(bot_token, store.clone());
    let state = AppState::new(Arc::new(distributor), store, rewriter);

    let server = GatewayServer::new(config.gateway.host.clone(), config.gateway.port, state);
    server.run().await?;

    Ok(())
}
