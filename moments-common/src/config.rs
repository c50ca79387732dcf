//! Configuration loading and API endpoint resolution
//!
//! Settings come from four tiers, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! The config file is optional. A missing file logs a warning and yields
//! defaults; a file that exists but does not parse is a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Compiled default REST base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the REST base URL
pub const API_URL_ENV: &str = "MOMENTS_API_URL";

/// Environment variable carrying the admin bearer token
pub const ADMIN_TOKEN_ENV: &str = "MOMENTS_ADMIN_TOKEN";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// REST base URL, e.g. `https://music.example.com/api`
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer token for write endpoints
    #[serde(default)]
    pub admin_token: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit path; a missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded TOML config");
        Ok(config)
    }

    /// Load from `path` if given, else from the default location
    ///
    /// Missing files degrade to defaults with a warning.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        match candidate {
            Some(p) if p.exists() => Self::load_from(&p),
            Some(p) => {
                if path.is_some() {
                    warn!("Config file not found: {}, using defaults", p.display());
                } else {
                    debug!("No config file at {}, using defaults", p.display());
                }
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Default config file location: `<config_dir>/moments/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("moments").join("config.toml"))
}

/// Resolve the REST base URL
///
/// Priority: CLI → `MOMENTS_API_URL` → TOML `api_url` → [`DEFAULT_API_URL`].
/// Blank values at any tier are skipped. A trailing slash is trimmed.
pub fn resolve_api_url(cli_arg: Option<&str>, toml_config: &TomlConfig) -> String {
    let env_value = std::env::var(API_URL_ENV).ok();

    let resolved = first_non_blank([
        cli_arg,
        env_value.as_deref(),
        toml_config.api_url.as_deref(),
    ])
    .unwrap_or(DEFAULT_API_URL);

    resolved.trim().trim_end_matches('/').to_string()
}

/// Resolve the admin bearer token
///
/// Priority: CLI → `MOMENTS_ADMIN_TOKEN` → TOML `admin_token` → none.
pub fn resolve_admin_token(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Option<String> {
    let env_value = std::env::var(ADMIN_TOKEN_ENV).ok();

    first_non_blank([
        cli_arg,
        env_value.as_deref(),
        toml_config.admin_token.as_deref(),
    ])
    .map(|t| t.trim().to_string())
}

fn first_non_blank<'a>(tiers: [Option<&'a str>; 3]) -> Option<&'a str> {
    tiers.into_iter().flatten().find(|v| !v.trim().is_empty())
}
