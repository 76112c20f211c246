//! Telegram admin bot for Herald.
//!
//! Lets an operator manage the channel registry from a private chat:
//! list channels, add one by forwarding a post or pasting its id, and
//! remove one through an inline button.

pub mod bot;
pub mod handlers;

pub use bot::{AdminBot, BotState};
