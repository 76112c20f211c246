//! Core channel traits.

use async_trait::async_trait;
use herald_core::types::TextFormat;

use crate::Result;

/// Trait for sending text through a messaging platform.
///
/// An implementor owns one client session for its lifetime; dropping the
/// value releases the session. The dispatcher constructs a fresh sender per
/// batch and never holds one across calls.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Send text to a single channel.
    async fn send(&self, channel_id: &str, text: &str, format: TextFormat) -> Result<()>;

    /// Get the maximum message length for this platform.
    fn max_message_length(&self) -> usize {
        4096 // Default
    }
}
