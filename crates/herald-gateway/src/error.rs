//! Gateway error types.

use thiserror::Error;

/// Errors that can occur while running the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// I/O error, typically a failed bind.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}
