//! Runtime configuration assembled from the environment.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::env::{self, vars};
use crate::error::ConfigError;

/// Default gateway listen port (matches the legacy deployment).
pub const DEFAULT_PORT: u16 = 5000;

/// Default gateway bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default channel registry file, relative to the working directory.
pub const DEFAULT_CHANNELS_FILE: &str = "channels.json";

/// Gateway bind settings.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Bind host.
    pub host: String,

    /// Listen port.
    pub port: u16,
}

impl GatewaySettings {
    /// Bind address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Completion backend settings. Absent when no API key is configured, in
/// which case article rewriting is disabled and broadcasting still works.
#[derive(Clone)]
pub struct RewriteSettings {
    /// API key for the OpenAI-compatible backend.
    pub api_key: SecretString,

    /// Base URL override (`https://api.openai.com/v1` when unset).
    pub api_base: Option<String>,

    /// Model override.
    pub model: Option<String>,
}

impl std::fmt::Debug for RewriteSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteSettings")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token. Optional so read-only commands work without it;
    /// send paths call [`Config::require_bot_token`].
    pub bot_token: Option<String>,

    /// Gateway bind settings.
    pub gateway: GatewaySettings,

    /// Channel registry file path.
    pub channels_file: PathBuf,

    /// Completion backend settings, when configured.
    pub rewrite: Option<RewriteSettings>,
}

impl Config {
    /// Build configuration from the process environment.
    ///
    /// Call [`crate::env::load_dotenv`] first if dotenv files should be
    /// honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::get_var(vars::PORT) {
            None => DEFAULT_PORT,
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::invalid(vars::PORT, v.clone()))?,
        };

        let rewrite = env::get_var(vars::OPENAI_API_KEY).map(|key| RewriteSettings {
            api_key: SecretString::new(key),
            api_base: env::get_var(vars::OPENAI_API_BASE),
            model: env::get_var(vars::HERALD_REWRITE_MODEL),
        });

        Ok(Self {
            bot_token: env::get_var(vars::BOT_TOKEN),
            gateway: GatewaySettings {
                host: env::get_var_or(vars::HERALD_HOST, DEFAULT_HOST),
                port,
            },
            channels_file: env::get_var_or(vars::HERALD_CHANNELS_FILE, DEFAULT_CHANNELS_FILE)
                .into(),
            rewrite,
        })
    }

    /// Return the bot token or fail with a configuration error.
    pub fn require_bot_token(&self) -> Result<&str, ConfigError> {
        self.bot_token
            .as_deref()
            .ok_or(ConfigError::MissingVar(vars::BOT_TOKEN))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            gateway: GatewaySettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            channels_file: DEFAULT_CHANNELS_FILE.into(),
            rewrite: None,
        }
    }
}
