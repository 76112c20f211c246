//! Channel error types.

use std::io;
use thiserror::Error;

use herald_core::types::DispatchReport;

/// Errors that can occur during channel operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Channel id is not a valid platform chat id.
    #[error("Invalid channel id: {0}")]
    InvalidChannelId(String),

    /// Channel id already present in the registry.
    #[error("Channel already registered: {0}")]
    AlreadyRegistered(String),

    /// Authentication error.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: retry after {retry_after_secs} seconds")]
    RateLimit {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Platform-specific error.
    #[error("Channel error ({channel}): {message}")]
    Channel {
        /// Platform name.
        channel: String,
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Operation timed out")]
    Timeout,
}

impl ChannelError {
    /// Create a platform-specific error.
    pub fn channel(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Channel {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Create an invalid channel id error.
    pub fn invalid_channel_id(id: impl Into<String>) -> Self {
        Self::InvalidChannelId(id.into())
    }

    /// Create an auth error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a rate limit error.
    pub fn rate_limit(retry_after_secs: u64) -> Self {
        Self::RateLimit { retry_after_secs }
    }

    /// Check if this error is retriable.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::RateLimit { .. } | Self::Timeout | Self::Io(_))
    }
}

/// Errors that abort a dispatch.
///
/// Per-channel send failures are not errors; they are recorded in the
/// [`DispatchReport`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request text was empty after trimming.
    #[error("empty article text")]
    EmptyText,

    /// No channels resolved for the request.
    #[error("no channels configured")]
    NoChannels,

    /// Strict mode only: every send in a non-empty batch failed.
    #[error("all {} sends failed", .report.total)]
    AllFailed {
        /// The report the lenient policy would have returned.
        report: DispatchReport,
    },
}
