//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `tiadmin.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;
use tiadmin_domain::settings::{
    DEFAULT_API_BASE, DEFAULT_COUNTER_URL, DashboardSettings, PollIntervals,
};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Settings forwarded to the dashboard.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Directory with the compiled dashboard (`trunk build` output).
    pub assets_dir: PathBuf,
}

/// What the dashboard is told at `/config.json`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the management REST API.
    pub api_base: String,
    /// Full URL of the demo counter endpoint.
    pub counter_url: String,
    pub fast_interval_ms: u32,
    pub slow_interval_ms: u32,
    pub sidebar_interval_ms: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `tiadmin.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("tiadmin.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("TIADMIN_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("TIADMIN_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("TIADMIN_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("TIADMIN_ASSETS") {
            self.server.assets_dir = PathBuf::from(val);
        }
        if let Some(val) = var("TIADMIN_API_BASE") {
            self.dashboard.api_base = val;
        }
        if let Some(val) = var("TIADMIN_COUNTER_URL") {
            self.dashboard.counter_url = val;
        }
        if let Some(val) = var("TIADMIN_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let intervals = [
            ("fast_interval_ms", self.dashboard.fast_interval_ms),
            ("slow_interval_ms", self.dashboard.slow_interval_ms),
            ("sidebar_interval_ms", self.dashboard.sidebar_interval_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::Validation(format!("{name} must be non-zero")));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settings published to the dashboard.
    #[must_use]
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            api_base: self.dashboard.api_base.clone(),
            counter_url: self.dashboard.counter_url.clone(),
            intervals: PollIntervals {
                fast_ms: self.dashboard.fast_interval_ms,
                slow_ms: self.dashboard.slow_interval_ms,
                sidebar_ms: self.dashboard.sidebar_interval_ms,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            assets_dir: PathBuf::from("dist"),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let intervals = PollIntervals::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            counter_url: DEFAULT_COUNTER_URL.to_string(),
            fast_interval_ms: intervals.fast_ms,
            slow_interval_ms: intervals.slow_ms,
            sidebar_interval_ms: intervals.sidebar_ms,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "tiadmind=info,tiadmin=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
