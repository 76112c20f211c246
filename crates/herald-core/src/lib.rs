//! # herald-core
//!
//! Core types, configuration, and utilities for Herald.
//!
//! This crate provides shared functionality used across all Herald crates:
//!
//! - **Types**: Channel descriptors, dispatch requests, and dispatch reports
//! - **Configuration**: Environment-driven runtime configuration
//! - **Utilities**: Environment variable and dotenv handling

pub mod config;
pub mod env;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use types::*;
