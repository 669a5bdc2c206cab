//! Configuration struct, loading and validation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::LogLevel;

/// Environment variable overriding [`Config::font_host`].
pub const FONT_HOST_ENV: &str = "STAT_CARD_FONT_HOST";

/// stat-card configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base URL (scheme + host) of the font-serving endpoint
    #[serde(default = "crate::defaults::font_host")]
    pub font_host: String,

    /// Global timeout for one font request, in seconds
    #[serde(default = "crate::defaults::fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum accepted font bundle size, in bytes
    #[serde(default = "crate::defaults::max_bundle_bytes")]
    pub max_bundle_bytes: u64,

    /// `User-Agent` header sent to the font endpoint
    #[serde(default = "crate::defaults::user_agent")]
    pub user_agent: String,

    /// Font families per language code, replacing the built-in entry for each code
    #[serde(default = "crate::defaults::language_fonts")]
    pub language_fonts: BTreeMap<String, Vec<String>>,

    /// Log level (overridden by `RUST_LOG` and `--log-level`)
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_host: crate::defaults::font_host(),
            fetch_timeout_secs: crate::defaults::fetch_timeout_secs(),
            max_bundle_bytes: crate::defaults::max_bundle_bytes(),
            user_agent: crate::defaults::user_agent(),
            language_fonts: crate::defaults::language_fonts(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults if
    /// no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        Self::load_or_default(&config_path, std::env::var(FONT_HOST_ENV).ok())
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_file(path, std::env::var(FONT_HOST_ENV).ok())
    }

    fn load_file(path: &Path, host_override: Option<String>) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let mut config = Self::from_yaml(&contents)?;
        config.apply_font_host_override(host_override);
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults. Either way the
    /// host override is applied and the result validated.
    fn load_or_default(path: &Path, host_override: Option<String>) -> Result<Self> {
        if path.exists() {
            return Self::load_file(path, host_override);
        }

        log::info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_font_host_override(host_override);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Point `font_host` at a non-blank override (from [`FONT_HOST_ENV`]).
    fn apply_font_host_override(&mut self, host: Option<String>) {
        if let Some(host) = host
            && !host.trim().is_empty()
        {
            log::info!("Font host overridden by {}: {}", FONT_HOST_ENV, host);
            self.font_host = host.trim().to_string();
        }
    }

    /// Check field values for semantic errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_bundle_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_bundle_bytes must be greater than 0".to_string(),
            ));
        }

        let url = url::Url::parse(&self.font_host).map_err(|e| {
            ConfigError::Validation(format!("font_host '{}' is not a URL: {e}", self.font_host))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "font_host '{}' must use http or https",
                self.font_host
            )));
        }

        if self.language_fonts.keys().any(|code| code.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "language_fonts contains an empty language code".to_string(),
            ));
        }

        Ok(())
    }

    /// Font request timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("stat-card")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("stat-card")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
