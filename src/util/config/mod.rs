//! cel-repl configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Explicit config file (--config)
//! 3. User-level (~/.config/cel-repl/config.toml)
//! 4. Default values
//! ```
//!
//! Everything is fixed once the REPL is constructed; there is no runtime
//! reconfiguration.
//!
//! # Usage
//!
//! ```rust
//! use cel_repl::util::config::{load_user_config, UserConfig};
//!
//! let config: UserConfig = load_user_config().unwrap();
//! assert!(config.repl.history_size > 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserConfig {
    /// REPL settings
    #[serde(default)]
    pub repl: ReplConfig,
}

/// REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplConfig {
    /// Number of inputs kept for `inspect`
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Run the type checker before evaluation
    #[serde(default = "default_true")]
    pub check: bool,
    /// Expand `has`, `all`, `exists`, `exists_one`, `map` and `filter`
    #[serde(default = "default_true")]
    pub macros: bool,
    /// Prompt text, printed after the `(N)` counter
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Indent width of the structured inspect format
    #[serde(default = "default_format_indent")]
    pub format_indent: usize,
    /// Use vi key bindings in the line editor
    #[serde(default)]
    pub vi_mode: bool,
}

fn default_history_size() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_format_indent() -> usize {
    2
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            check: true,
            macros: true,
            prompt: default_prompt(),
            format_indent: default_format_indent(),
            vi_mode: false,
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("cel-repl"));
    }

    // Fallback to ~/.config/cel-repl
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("cel-repl"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("cel-repl"));
    }

    None
}

/// Get the user config file path (~/.config/cel-repl/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load user-level configuration
/// Returns default config if the file doesn't exist
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    match get_config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(UserConfig::default()),
    }
}

/// Load configuration from an explicit path; the file must exist
pub fn load_config_from(path: &Path) -> Result<UserConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<UserConfig, ConfigError> {
    let config: UserConfig = toml::from_str(content)?;
    if config.repl.history_size == 0 {
        return Err(ConfigError::Invalid(
            "repl.history_size must be positive".to_string(),
        ));
    }
    Ok(config)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
