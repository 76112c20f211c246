//! Admin bot command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use herald_bot::AdminBot;
use herald_channels::ChannelStore;
use herald_core::Config;

/// Bot command arguments.
#[derive(Args)]
pub struct BotArgs {
    /// Path to the channel registry file
    #[arg(long)]
    pub channels_file: Option<PathBuf>,
}

/// Run the Telegram admin bot.
pub async fn run(args: BotArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(path) = args.channels_file {
        config.channels_file = path;
    }

    let bot_token = config.require_bot_token()?.to_string();
    let store = ChannelStore::new(&config.channels_file);
    info!("Channel registry: {}", store.path().display());

    AdminBot::new(bot_token, store).run().await?;
    Ok(())
}
