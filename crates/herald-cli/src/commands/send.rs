//! Broadcast command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use herald_channels::{ChannelStore, DispatchPolicy, Distributor};
use herald_core::types::{DispatchRequest, TextFormat};
use herald_core::Config;

/// Send command arguments.
#[derive(Args)]
pub struct SendArgs {
    /// Article text (reads stdin when omitted)
    pub text: Option<String>,

    /// Read the article text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Target channel id (repeatable; all channels when omitted)
    #[arg(long = "channel", allow_hyphen_values = true)]
    pub channel: Vec<String>,

    /// Send without HTML formatting
    #[arg(long)]
    pub plain: bool,

    /// Fail with a non-zero exit when every send fails
    #[arg(long)]
    pub strict: bool,
}

/// Run the send command.
pub async fn run(args: SendArgs) -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    let bot_token = config.require_bot_token()?.to_string();

    let text = super::read_text(args.text, args.file.as_deref())?;

    let policy = DispatchPolicy {
        format: if args.plain {
            TextFormat::Plain
        } else {
            TextFormat::Html
        },
        fail_when_all_fail: args.strict,
    };

    let store = ChannelStore::new(&config.channels_file);
    let distributor = Distributor::new(bot_token, store).with_policy(policy);

    let request = DispatchRequest {
        text,
        target_ids: args.channel,
    };
    let report = distributor.distribute(&request).await?;

    println!("Sent to {}/{} channels", report.sent, report.total);
    for failure in &report.failures {
        println!("  failed: {} ({})", failure.channel, failure.error);
    }

    Ok(())
}
