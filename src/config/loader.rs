//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "SLIDES_CONFIG";
/// Environment variable overriding the theme.
pub const THEME_ENV_VAR: &str = "SLIDES_THEME";

/// Default reload polling interval in milliseconds.
pub const DEFAULT_RELOAD_INTERVAL_MS: u64 = 1000;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a regular file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A `[keybindings]` entry names an unknown action or an unparsable key.
    #[error("Invalid key binding for '{action}': '{key}'")]
    InvalidKeyBinding {
        /// Action name as written in the config file.
        action: String,
        /// Offending key string (empty when the action itself is unknown).
        key: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/slides/config.toml`:
///
/// ```toml
/// theme = "dracula"
/// reload_interval_ms = 500
///
/// [keybindings]
/// next_slide = ["space", "ctrl+f"]
/// quit = ["q"]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Theme name. Setting it pins the theme regardless of document metadata.
    #[serde(default)]
    pub theme: Option<String>,

    /// Interval between live-reload checks.
    #[serde(default)]
    pub reload_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Action name to replacement key list.
    #[serde(default)]
    pub keybindings: Option<BTreeMap<String, Vec<String>>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Explicit theme. `None` lets the document metadata decide.
    pub theme: Option<String>,
    /// Interval between live-reload checks.
    pub reload_interval: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Key binding overrides, applied on top of the defaults.
    pub keybindings: BTreeMap<String, Vec<String>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: None,
            reload_interval: Duration::from_millis(DEFAULT_RELOAD_INTERVAL_MS),
            log_file_path: default_log_path(),
            keybindings: BTreeMap::new(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/slides/slides.log` on Linux, or the platform's
/// equivalent. Falls back to the current directory when no state directory
/// exists (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("slides").join("slides.log")
    } else {
        PathBuf::from("slides.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/slides/config.toml` on Linux, appropriate path on other
/// platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slides").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SLIDES_CONFIG` environment variable
/// 3. Default path `~/.config/slides/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// `SLIDES_THEME` overrides the theme; an empty value is ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(THEME_ENV_VAR) {
        if !theme.is_empty() {
            config.theme = Some(theme);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        theme: config.theme.filter(|t| !t.is_empty()).or(defaults.theme),
        reload_interval: config
            .reload_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.reload_interval),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    theme_override: Option<String>,
    reload_interval_ms: Option<u64>,
) -> ResolvedConfig {
    if let Some(theme) = theme_override {
        config.theme = Some(theme);
    }

    if let Some(ms) = reload_interval_ms {
        config.reload_interval = Duration::from_millis(ms);
    }

    config
}

/// Full resolution: file (by precedence), then env, then CLI.
///
/// # Errors
///
/// Propagates [`ConfigError`] from [`load_config_with_precedence`].
pub fn resolve(
    config_path: Option<PathBuf>,
    theme_override: Option<String>,
    reload_interval_ms: Option<u64>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file));
    Ok(apply_cli_overrides(config, theme_override, reload_interval_ms))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
