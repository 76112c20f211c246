//! Update handlers and command parsing.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{Chat, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use teloxide::utils::html::escape;
use tracing::{debug, warn};

use herald_channels::ChannelError;
use herald_core::types::ChannelDescriptor;

use crate::bot::BotState;

/// Callback data prefix for the per-channel remove buttons.
const REMOVE_PREFIX: &str = "remove_channel_";

const HELP_TEXT: &str = "<b>Herald admin bot</b>\n\n\
    /channels - list registered channels\n\
    /add_channel - register a new channel\n\
    /cancel - abort the current operation\n\
    /help - this message\n\n\
    To register a channel, make the bot an administrator of the channel, \
    then forward any post from it here or send the channel's numeric id.";

/// Split a `/command arg` message into command name and argument tail.
///
/// Accepts the `/command@BotName` form Telegram uses in groups. Returns
/// `None` for plain text.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    let text = text.trim().strip_prefix('/')?;
    let (command, rest) = match text.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (text, ""),
    };
    let command = command.split('@').next().unwrap_or(command);
    if command.is_empty() {
        return None;
    }
    Some((command, rest))
}

/// Parse a hand-typed channel reference: a channel id with an optional name
/// after it, like `-1001234567890 Evening News`. Telegram channel ids carry
/// a `-100` prefix; anything else is rejected before touching the registry.
fn parse_manual_entry(text: &str) -> Option<(i64, Option<String>)> {
    let text = text.trim();
    let (id, name) = match text.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, Some(rest.trim().to_string()).filter(|n| !n.is_empty())),
        None => (text, None),
    };
    if !id.starts_with("-100") {
        return None;
    }
    let id = id.parse::<i64>().ok()?;
    Some((id, name))
}

/// Render the channel list with one remove button per channel.
fn render_channel_list(channels: &[ChannelDescriptor]) -> (String, InlineKeyboardMarkup) {
    let mut text = String::from("<b>Registered channels</b>\n");
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    for channel in channels {
        text.push_str(&format!(
            "\n{}\n<code>{}</code>\n",
            escape(&channel.name),
            escape(&channel.id)
        ));
        keyboard.push(vec![InlineKeyboardButton::callback(
            format!("Remove {}", channel.name),
            format!("{REMOVE_PREFIX}{}", channel.id),
        )]);
    }

    (text, InlineKeyboardMarkup::new(keyboard))
}

/// Handle a private-chat message.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    // A forwarded channel post answers a pending /add_channel.
    if state.is_pending(chat_id).await {
        if let Some(source) = msg.forward_from_chat() {
            return capture_forwarded(&bot, chat_id, source, &state).await;
        }
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    match parse_command(text) {
        Some(("start", _)) | Some(("help", _)) => {
            bot.send_message(chat_id, HELP_TEXT)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Some(("channels", _)) => {
            let channels = state.store.load_or_empty().await;
            if channels.is_empty() {
                bot.send_message(chat_id, "No channels registered yet. Use /add_channel.")
                    .await?;
            } else {
                let (list, keyboard) = render_channel_list(&channels);
                bot.send_message(chat_id, list)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(keyboard)
                    .await?;
            }
        }
        Some(("add_channel", _)) => {
            state.set_pending(chat_id).await;
            bot.send_message(
                chat_id,
                "Forward any post from the channel here, or send its numeric id \
                 (optionally followed by a name). /cancel to abort.",
            )
            .await?;
        }
        Some(("cancel", _)) => {
            let reply = if state.clear_pending(chat_id).await {
                "Cancelled."
            } else {
                "Nothing to cancel."
            };
            bot.send_message(chat_id, reply).await?;
        }
        Some((command, _)) => {
            debug!("Unknown command /{} from {}", command, chat_id);
            bot.send_message(chat_id, "Unknown command. /help lists what I understand.")
                .await?;
        }
        None => {
            if state.is_pending(chat_id).await {
                handle_manual_entry(&bot, chat_id, text, &state).await?;
            }
        }
    }

    Ok(())
}

/// Handle an inline-button press.
pub async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    bot.answer_callback_query(query.id).await?;

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(id) = data.strip_prefix(REMOVE_PREFIX) else {
        return Ok(());
    };

    let note = match state.store.remove(id).await {
        Ok(true) => "Channel removed.".to_string(),
        Ok(false) => "Channel was not in the list.".to_string(),
        Err(e) => {
            warn!("Failed to remove channel {}: {}", id, e);
            "Failed to update the channel list.".to_string()
        }
    };

    if let Some(message) = query.message {
        bot.edit_message_text(message.chat.id, message.id, note)
            .await?;
    }

    Ok(())
}

/// Register a channel from a forwarded post.
async fn capture_forwarded(
    bot: &Bot,
    chat_id: ChatId,
    source: &Chat,
    state: &BotState,
) -> ResponseResult<()> {
    if !source.is_channel() {
        bot.send_message(chat_id, "That was not forwarded from a channel.")
            .await?;
        return Ok(());
    }

    let id = source.id.to_string();
    let name = source
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    register_channel(bot, chat_id, ChannelDescriptor::new(id, name), state).await
}

/// Register a channel from a hand-typed id.
async fn handle_manual_entry(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    state: &BotState,
) -> ResponseResult<()> {
    let Some((id, name)) = parse_manual_entry(text) else {
        bot.send_message(
            chat_id,
            "That does not look like a channel id. Send something like \
             <code>-1001234567890</code>, or /cancel.",
        )
        .parse_mode(ParseMode::Html)
        .await?;
        return Ok(());
    };

    // No name given: ask Telegram for the channel title. The bot may not
    // be a member yet, so fall back to the bare id.
    let name = match name {
        Some(name) => name,
        None => {
            let title = match bot.get_chat(ChatId(id)).await {
                Ok(chat) => chat.title().map(str::to_string),
                Err(e) => {
                    debug!("get_chat({}) failed: {}", id, e);
                    None
                }
            };
            title.unwrap_or_else(|| id.to_string())
        }
    };

    register_channel(bot, chat_id, ChannelDescriptor::new(id.to_string(), name), state).await
}

async fn register_channel(
    bot: &Bot,
    chat_id: ChatId,
    descriptor: ChannelDescriptor,
    state: &BotState,
) -> ResponseResult<()> {
    let reply = match state.store.add(descriptor.clone()).await {
        Ok(()) => {
            state.clear_pending(chat_id).await;
            format!(
                "Channel registered:\n<b>{}</b>\n<code>{}</code>",
                escape(&descriptor.name),
                escape(&descriptor.id)
            )
        }
        Err(ChannelError::AlreadyRegistered(_)) => {
            state.clear_pending(chat_id).await;
            "That channel is already registered.".to_string()
        }
        Err(e) => {
            warn!("Failed to save channel {}: {}", descriptor.id, e);
            "Failed to save the channel. Try again.".to_string()
        }
    };

    bot.send_message(chat_id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
