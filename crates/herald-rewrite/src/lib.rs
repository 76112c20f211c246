//! Article rewriting for Herald.
//!
//! Turns source article text into channel-ready copy: builds a style prompt,
//! calls an OpenAI-compatible completion backend, and strips reasoning
//! artifacts from the result.

pub mod error;
pub mod openai;
pub mod rewriter;
pub mod sanitize;
pub mod style;

pub use error::{Result, RewriteError};
pub use openai::{CompletionOptions, CompletionProvider, OpenAiClient};
pub use rewriter::Rewriter;
pub use sanitize::sanitize;
pub use style::RewriteStyle;
