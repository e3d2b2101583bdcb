//! Configuration management for the `SkySense` backend
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkySenseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `SkySense` backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkySenseConfig {
    /// Upstream weather provider configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dashboard view-model settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Upstream weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Provider API key (required)
    pub api_key: Option<String>,
    /// Base URL for geocoding and One Call endpoints
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Allowed CORS origin; any origin when unset
    pub client_url: Option<String>,
    /// Directory with a built frontend to serve as fallback
    pub static_dir: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Dashboard view-model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// City used when no city was chosen and geolocation fails
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Secondary cities always summarized next to the primary view
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
    #[serde(default = "default_geolocation_timeout_ms")]
    pub geolocation_timeout_ms: u64,
    /// Shortest query forwarded to city search
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

// Default value functions
fn default_upstream_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    "London".to_string()
}

fn default_roster() -> Vec<String> {
    ["New York", "Dubai", "Tokyo", "London", "Ibadan", "Lagos"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_geolocation_timeout_ms() -> u64 {
    5000
}

fn default_search_min_chars() -> usize {
    3
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_upstream_base_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            client_url: None,
            static_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            roster: default_roster(),
            geolocation_timeout_ms: default_geolocation_timeout_ms(),
            search_min_chars: default_search_min_chars(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl SkySenseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var("SKYSENSE_CONFIG").ok().map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            let local = PathBuf::from("config/default.toml");
            if local.exists() {
                local
            } else {
                Self::get_config_path().unwrap_or(local)
            }
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYSENSE__UPSTREAM__API_KEY, SKYSENSE__DASHBOARD__ROSTER="Paris,Rome", ...
        builder = builder.add_source(
            Environment::with_prefix("SKYSENSE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("dashboard.roster")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkySenseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_legacy_env(|name| std::env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skysense").join("config.toml"))
    }

    /// Honour the plain `OWM_API_KEY`, `CLIENT_URL` and `PORT` variables
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OWM_API_KEY") {
            self.upstream.api_key = Some(key.trim().to_string());
        }
        if let Some(origin) = lookup("CLIENT_URL") {
            self.server.client_url = Some(origin);
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.upstream.base_url.is_empty() {
            self.upstream.base_url = default_upstream_base_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.dashboard.geolocation_timeout_ms == 0 {
            self.dashboard.geolocation_timeout_ms = default_geolocation_timeout_ms();
        }
        if self.server.client_url.as_deref() == Some("*") {
            self.server.client_url = None;
        }
        self.upstream.base_url = self.upstream.base_url.trim_end_matches('/').to_string();
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        match self.upstream.api_key.as_deref().map(str::trim) {
            None | Some("") => Err(SkySenseError::config(
                "Upstream API key is missing. Set OWM_API_KEY or upstream.api_key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(SkySenseError::config("Server port cannot be 0").into());
        }

        if self.dashboard.geolocation_timeout_ms > 60_000 {
            return Err(
                SkySenseError::config("Geolocation timeout cannot exceed 60000 ms").into(),
            );
        }

        if self.dashboard.search_min_chars == 0 {
            return Err(SkySenseError::config("Search minimum length must be at least 1").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkySenseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkySenseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(SkySenseError::config(
                "Upstream base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.dashboard.default_city.trim().is_empty() {
            return Err(SkySenseError::config("Default city cannot be empty").into());
        }

        if self.dashboard.roster.iter().all(|c| c.trim().is_empty()) {
            return Err(SkySenseError::config("City roster cannot be empty").into());
        }

        Ok(())
    }

    /// Key prefix safe to print in startup logs
    #[must_use]
    pub fn api_key_hint(&self) -> String {
        match self.upstream.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                format!("{}...", key.chars().take(5).collect::<String>())
            }
            _ => "MISSING".to_string(),
        }
    }
}
