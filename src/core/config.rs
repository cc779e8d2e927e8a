//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.waview/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::remote::DEFAULT_ENDPOINT;

/// Env var overriding the message endpoint.
pub const ENDPOINT_ENV: &str = "WAVIEW_API_ENDPOINT";

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WaviewConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub default_phone: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// No timeout unless configured.
    pub timeout: Option<Duration>,
    /// Phone number pre-filled at startup (empty = none).
    pub initial_phone: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.waview/`, where config and preferences live.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".waview"))
}

/// Returns the path to `~/.waview/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.waview/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WaviewConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WaviewConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WaviewConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<WaviewConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WaviewConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WaviewConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# waview configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# endpoint = "http://localhost:5555/users/wp-messages"   # Or set WAVIEW_API_ENDPOINT
# timeout_secs = 10                                      # No timeout when unset

# [ui]
# default_phone = "15550001234"                          # Pre-filled at startup
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env_endpoint` is the value of [`ENDPOINT_ENV`]; a blank value is ignored.
/// `cli_endpoint` and `cli_phone` are from CLI flags (None = not specified).
pub fn resolve(
    config: &WaviewConfig,
    env_endpoint: Option<&str>,
    cli_endpoint: Option<&str>,
    cli_phone: Option<&str>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli_endpoint
        .or(env_endpoint.filter(|s| !s.trim().is_empty()))
        .map(|s| s.to_string())
        .or_else(|| config.api.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Initial phone: CLI → config → none
    let initial_phone = cli_phone
        .map(|s| s.to_string())
        .or_else(|| config.ui.default_phone.clone())
        .unwrap_or_default();

    ResolvedConfig {
        endpoint,
        timeout: config
            .api
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        initial_phone,
    }
}
