//! Article rewrite command.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use herald_core::Config;
use herald_rewrite::RewriteStyle;

/// Rewrite command arguments.
#[derive(Args)]
pub struct RewriteArgs {
    /// Article text (reads stdin when omitted)
    pub text: Option<String>,

    /// Read the article text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Rewrite style: scientific, meme or casual
    #[arg(long, default_value = "casual")]
    pub style: String,

    /// Print the model output without sanitation
    #[arg(long)]
    pub raw: bool,
}

/// Run the rewrite command.
pub async fn run(args: RewriteArgs) -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    let Some(settings) = &config.rewrite else {
        anyhow::bail!("Rewrite backend not configured. Set OPENAI_API_KEY to enable it.");
    };

    let style: RewriteStyle = args.style.parse()?;
    let text = super::read_text(args.text, args.file.as_deref())?;

    let rewriter = super::build_rewriter(settings)?;
    let output = if args.raw {
        rewriter.rewrite_raw(&text, style).await?
    } else {
        rewriter.rewrite(&text, style).await?
    };

    println!("{}", output);
    Ok(())
}
