//! Herald command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

/// Herald - broadcast articles to Telegram channels
#[derive(Parser)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve(commands::serve::ServeArgs),

    /// Run the Telegram admin bot
    Bot(commands::bot::BotArgs),

    /// Manage the channel registry
    Channels(commands::channels::ChannelsArgs),

    /// Broadcast an article to channels
    Send(commands::send::SendArgs),

    /// Rewrite an article in a chosen style
    Rewrite(commands::rewrite::RewriteArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Bot(args) => commands::bot::run(args).await,
        Commands::Channels(args) => commands::channels::run(args).await,
        Commands::Send(args) => commands::send::run(args).await,
        Commands::Rewrite(args) => commands::rewrite::run(args).await,
        Commands::Version => {
            println!("herald {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
