//! High-level rewrite orchestration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, RewriteError};
use crate::openai::{CompletionOptions, CompletionProvider};
use crate::sanitize::sanitize;
use crate::style::{build_prompt, RewriteStyle};

/// Rewrites articles through a completion provider and cleans the output.
pub struct Rewriter {
    provider: Arc<dyn CompletionProvider>,
    options: CompletionOptions,
}

impl Rewriter {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            options: CompletionOptions::default(),
        }
    }

    /// Replace the default completion options.
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    async fn complete_for(&self, article: &str, style: RewriteStyle) -> Result<String> {
        let article = article.trim();
        if article.is_empty() {
            return Err(RewriteError::EmptyInput);
        }

        info!(style = %style, chars = article.chars().count(), "rewriting article");

        let prompt = build_prompt(style, article);
        let completion = self.provider.complete(&prompt, &self.options).await?;

        debug!(chars = completion.chars().count(), "received completion");
        Ok(completion)
    }

    /// Rewrite an article in the given style and sanitize the result.
    pub async fn rewrite(&self, article: &str, style: RewriteStyle) -> Result<String> {
        let completion = self.complete_for(article, style).await?;
        Ok(sanitize(&completion))
    }

    /// Rewrite without sanitation, returning the raw model output.
    pub async fn rewrite_raw(&self, article: &str, style: RewriteStyle) -> Result<String> {
        self.complete_for(article, style).await
    }
}
