//! Environment variable handling.

use std::env;
use std::path::Path;

/// Dotenv files probed by [`load_dotenv`], in order. The second name is the
/// one the legacy deployment scripts wrote.
const DOTENV_FILES: &[&str] = &[".env", "BOT_TOKEN.env"];

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
pub fn get_var_or(name: &str, default: &str) -> String {
    get_var(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable as a boolean.
pub fn get_bool(name: &str) -> bool {
    get_var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Get an environment variable as a u16 (e.g., for ports).
pub fn get_u16(name: &str) -> Option<u16> {
    get_var(name).and_then(|v| v.parse().ok())
}

/// Load environment variables from the first dotenv file that exists.
///
/// Returns the name of the file that was loaded, if any.
pub fn load_dotenv() -> Result<Option<&'static str>, std::io::Error> {
    for name in DOTENV_FILES {
        if load_env_file(Path::new(name))? {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Load KEY=value pairs from a dotenv-style file. Returns false when the
/// file does not exist. Variables that are already set are not overridden.
pub fn load_env_file(path: &Path) -> Result<bool, std::io::Error> {
    if !path.exists() {
        return Ok(false);
    }
    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse KEY=value
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();

            // Remove quotes if present
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);

            // Only set if not already set
            if env::var(key).is_err() {
                env::set_var(key, value);
            }
        }
    }
    Ok(true)
}

/// Common environment variable names.
pub mod vars {
    /// Telegram bot token used for broadcasting and the admin bot.
    pub const BOT_TOKEN: &str = "BOT_TOKEN";

    /// Gateway listen port.
    pub const PORT: &str = "PORT";

    /// Gateway bind host.
    pub const HERALD_HOST: &str = "HERALD_HOST";

    /// Path to the channel registry file.
    pub const HERALD_CHANNELS_FILE: &str = "HERALD_CHANNELS_FILE";

    /// Herald log filter.
    pub const HERALD_LOG: &str = "HERALD_LOG";

    /// API key for the completion backend.
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

    /// Base URL override for the completion backend.
    pub const OPENAI_API_BASE: &str = "OPENAI_API_BASE";

    /// Model used for article rewriting.
    pub const HERALD_REWRITE_MODEL: &str = "HERALD_REWRITE_MODEL";
}
