//! Client configuration.
//!
//! Values come from defaults, then an optional JSON file, then environment
//! variables. Callers (the CLI) may override individual fields last.

use crate::errors::{Result, SprintPilotError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ClientConfig::api_base`].
pub const ENV_API_BASE: &str = "SPRINTPILOT_API_BASE";
/// Environment variable overriding [`ClientConfig::store_path`].
pub const ENV_STORE: &str = "SPRINTPILOT_STORE";
/// Environment variable overriding [`LogConfig::level`].
pub const ENV_LOG: &str = "SPRINTPILOT_LOG";

/// Configuration for talking to the backend and persisting stage outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the backend, without a trailing path.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// File holding the persisted stage outputs.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Additional headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_api_base() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".sprintpilot/store.json")
}

fn default_user_agent() -> String {
    format!("sprintpilot/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            store_path: default_store_path(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
            log: LogConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SprintPilotError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| SprintPilotError::Config(format!("invalid {}: {e}", path.display())))
    }

    /// Loads defaults (or `path`, if given) and applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from a variable lookup.
    ///
    /// Takes the lookup as a function so tests need not touch the process
    /// environment.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        if let Some(store) = lookup(ENV_STORE).filter(|v| !v.trim().is_empty()) {
            self.store_path = PathBuf::from(store);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log.level = level;
        }
        self
    }

    /// Sets the API base.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the store path.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Checks that the API base is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_base).map_err(|e| {
            SprintPilotError::Config(format!("invalid api_base '{}': {e}", self.api_base))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SprintPilotError::Config(format!(
                "api_base must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// Joins an endpoint path onto the API base.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `sprintpilot=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
