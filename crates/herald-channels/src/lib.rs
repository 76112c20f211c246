//! Messaging channel abstractions for Herald.
//!
//! This crate provides the file-backed channel registry, the Telegram
//! sender, and the broadcast dispatcher that fans article text out to
//! registered channels.

pub mod dispatch;
pub mod error;
pub mod store;
pub mod telegram;
pub mod traits;

pub use dispatch::{dispatch, DispatchPolicy, Distributor};
pub use error::{ChannelError, DispatchError};
pub use store::ChannelStore;
pub use telegram::TelegramSender;
pub use traits::ChannelSender;

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
