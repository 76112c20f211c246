//! CLI command implementations.

pub mod bot;
pub mod channels;
pub mod rewrite;
pub mod send;
pub mod serve;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;

use herald_core::config::RewriteSettings;
use herald_rewrite::{OpenAiClient, Rewriter};

/// Resolve article text from an inline argument, a file, or stdin.
pub(crate) fn read_text(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    if let Some(text) = text {
        return Ok(text);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read article text from stdin")?;
    Ok(buffer)
}

/// Build a rewriter from the configured backend settings.
pub(crate) fn build_rewriter(settings: &RewriteSettings) -> anyhow::Result<Rewriter> {
    let mut client = OpenAiClient::new(settings.api_key.expose_secret().clone())?;
    if let Some(base) = settings.api_base.as_deref() {
        client = client.with_base_url(base);
    }
    if let Some(model) = settings.model.as_deref() {
        client = client.with_default_model(model);
    }
    Ok(Rewriter::new(Arc::new(client)))
}
