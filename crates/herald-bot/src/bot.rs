//! Bot lifecycle and per-chat state.

use std::collections::HashSet;
use std::sync::Arc;

use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::info;

use herald_channels::{ChannelError, ChannelStore, Result};

use crate::handlers;

/// State shared by all update handlers.
pub struct BotState {
    /// The channel registry the bot edits.
    pub store: ChannelStore,

    /// Chats that ran `/add_channel` and owe us a channel reference.
    pending: RwLock<HashSet<ChatId>>,
}

impl BotState {
    pub fn new(store: ChannelStore) -> Self {
        Self {
            store,
            pending: RwLock::new(HashSet::new()),
        }
    }

    /// Whether this chat is in the middle of adding a channel.
    pub async fn is_pending(&self, chat: ChatId) -> bool {
        self.pending.read().await.contains(&chat)
    }

    pub async fn set_pending(&self, chat: ChatId) {
        self.pending.write().await.insert(chat);
    }

    /// Returns true if the chat actually had a pending add.
    pub async fn clear_pending(&self, chat: ChatId) -> bool {
        self.pending.write().await.remove(&chat)
    }
}

/// The admin bot: long-polls Telegram and mutates the registry.
pub struct AdminBot {
    bot: Bot,
    state: Arc<BotState>,
}

impl AdminBot {
    pub fn new(bot_token: impl Into<String>, store: ChannelStore) -> Self {
        Self {
            bot: Bot::new(bot_token),
            state: Arc::new(BotState::new(store)),
        }
    }

    /// Run the bot until the process is stopped.
    ///
    /// Verifies the token first so a bad configuration fails fast instead
    /// of polling forever.
    pub async fn run(self) -> Result<()> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| ChannelError::auth(e.to_string()))?;

        info!(
            "Admin bot online as @{}",
            me.username.as_deref().unwrap_or("unknown")
        );

        let message_state = self.state.clone();
        let message_branch = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let state = message_state.clone();
            async move { handlers::handle_message(bot, msg, state).await }
        });

        let callback_state = self.state.clone();
        let callback_branch =
            Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                let state = callback_state.clone();
                async move { handlers::handle_callback(bot, query, state).await }
            });

        let handler = dptree::entry()
            .branch(message_branch)
            .branch(callback_branch);

        Dispatcher::builder(self.bot, handler)
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
