//! Channel registry commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use herald_channels::ChannelStore;
use herald_core::types::ChannelDescriptor;
use herald_core::Config;

/// Channels command arguments.
#[derive(Args)]
pub struct ChannelsArgs {
    /// Path to the channel registry file
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ChannelsCommand,
}

#[derive(clap::Subcommand)]
pub enum ChannelsCommand {
    /// List registered channels
    List,

    /// Register a channel by its numeric id
    Add {
        /// Channel id, like -1001234567890
        #[arg(allow_hyphen_values = true)]
        id: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,
    },

    /// Remove a channel from the registry
    Remove {
        /// Channel id
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
}

/// Run the channels command.
pub async fn run(args: ChannelsArgs) -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    let path = args.file.unwrap_or(config.channels_file);
    let store = ChannelStore::new(path);

    match args.command {
        ChannelsCommand::List => {
            let channels = store.load().await?;
            if channels.is_empty() {
                println!("No channels registered.");
                return Ok(());
            }

            println!("Registered channels:\n");
            println!("  {:<18} {}", "ID", "NAME");
            println!("  {}", "-".repeat(40));
            for channel in &channels {
                println!("  {:<18} {}", channel.id, channel.name);
            }
        }

        ChannelsCommand::Add { id, name } => {
            if id.parse::<i64>().is_err() {
                anyhow::bail!("Invalid channel id: {} (expected a numeric id)", id);
            }
            let name = name.unwrap_or_else(|| id.clone());
            store
                .add(ChannelDescriptor::new(&id, &name))
                .await
                .context("Failed to register channel")?;
            println!("Added channel: {} ({})", name, id);
        }

        ChannelsCommand::Remove { id } => {
            if store.remove(&id).await? {
                println!("Removed channel: {}", id);
            } else {
                println!("Channel not found: {}", id);
            }
        }
    }

    Ok(())
}
