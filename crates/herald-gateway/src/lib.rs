//! HTTP gateway for Herald.
//!
//! Serves the REST API the web frontend talks to:
//! - `POST /api/send-article` broadcasts an article to Telegram channels
//! - `GET /api/channels` lists the registered channels
//! - `POST /api/rewrite` rewrites an article in a chosen style
//! - `GET /api/health` liveness probe

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::GatewayError;
pub use routes::router;
pub use server::GatewayServer;
pub use state::{AppState, ArticleDispatcher};

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
