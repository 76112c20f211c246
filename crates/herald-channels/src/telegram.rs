//! Telegram sender implementation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tracing::debug;

use herald_core::types::TextFormat;

use crate::error::ChannelError;
use crate::traits::ChannelSender;
use crate::Result;

/// Telegram implementation of [`ChannelSender`].
///
/// Each instance owns its own Bot API session. Callers construct one per
/// dispatch batch and drop it when the batch completes.
pub struct TelegramSender {
    /// Bot instance.
    bot: Bot,
}

impl TelegramSender {
    /// Create a new sender from a bot token.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(bot_token),
        }
    }

    /// Verify the token by calling `getMe`. Returns the bot username.
    pub async fn verify(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| ChannelError::auth(e.to_string()))?;

        Ok(me.username.as_deref().unwrap_or("unknown").to_string())
    }

    /// Parse a registry channel id into a Telegram chat id.
    fn chat_id(channel_id: &str) -> Result<ChatId> {
        channel_id
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| ChannelError::invalid_channel_id(channel_id))
    }
}

#[async_trait]
impl ChannelSender for TelegramSender {
    async fn send(&self, channel_id: &str, text: &str, format: TextFormat) -> Result<()> {
        let chat_id = Self::chat_id(channel_id)?;

        let mut request = self.bot.send_message(chat_id, text);
        if format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }

        request
            .await
            .map_err(|e| ChannelError::channel("telegram", e.to_string()))?;

        debug!(
            "Sent {} chars to Telegram chat {}",
            text.chars().count(),
            chat_id
        );
        Ok(())
    }
}
