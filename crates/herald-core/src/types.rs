//! Shared types for channel registration and broadcast dispatch.

use serde::{Deserialize, Serialize};

/// A registered destination channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Opaque platform identifier (Telegram channel ids look like `-100...`).
    pub id: String,

    /// Human-readable name shown in reports and admin listings.
    pub name: String,
}

impl ChannelDescriptor {
    /// Create a new channel descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Formatting mode for outbound messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// Plain text, no markup interpretation.
    Plain,

    /// HTML markup (the formatting mode broadcasts use).
    #[default]
    Html,
}

/// A request to broadcast one piece of text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Article text to deliver.
    pub text: String,

    /// Channel ids to target. Empty means every registered channel.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_ids: Vec<String>,
}

impl DispatchRequest {
    /// Request delivery to every registered channel.
    pub fn to_all(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_ids: Vec::new(),
        }
    }

    /// Request delivery to a specific set of channel ids.
    pub fn to_channels(text: impl Into<String>, target_ids: Vec<String>) -> Self {
        Self {
            text: text.into(),
            target_ids,
        }
    }
}

/// A single failed delivery within a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFailure {
    /// Channel name (not id) as registered.
    pub channel: String,

    /// Reason reported by the messaging client.
    pub error: String,
}

impl ChannelFailure {
    /// Create a new failure record.
    pub fn new(channel: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            error: error.into(),
        }
    }
}

/// Aggregated outcome of one dispatch.
///
/// Holds `sent + failures.len() == total`, where `total` is the number of
/// channels the dispatch resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Number of successful sends.
    pub sent: usize,

    /// Number of channels targeted.
    pub total: usize,

    /// Per-channel failures, in registry order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ChannelFailure>,
}

impl DispatchReport {
    /// True when every targeted channel received the text.
    pub fn all_sent(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when not a single send in a non-empty batch succeeded.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.sent == 0
    }
}
