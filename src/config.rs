//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILTRACE_CONFIG` (environment variable)
//! 2. `~/.config/mailtrace/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailtrace\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Interface language: "en", "es", or empty for the system locale.
    pub language: String,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: String::new(),
            log_level: "warn".to_string(),
        }
    }
}

/// Resolve the configuration file path, honoring `$MAILTRACE_CONFIG`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("MAILTRACE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("mailtrace").join("config.toml"))
}

/// Load the configuration, falling back to defaults when the file is
/// missing or malformed. A malformed file is reported but never fatal.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let Ok(text) = std::fs::read_to_string(&path) else {
        return Config::default();
    };
    match toml::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed config");
            Config::default()
        }
    }
}
