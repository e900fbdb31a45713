//! Client configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable that overrides the configured service URL.
pub const SERVER_URL_ENV: &str = "COLUMN_GAMES_SERVER";

/// Where the score service lives and where sign-ins are remembered.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the account and score service.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// File holding the remembered credentials.
    #[serde(default = "default_credentials_path")]
    credentials_path: PathBuf,
}

fn default_server_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("column_games_session.toml")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            credentials_path: default_credentials_path(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file; a missing file yields defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::new(format!(
                    "Failed to read config file: {}",
                    e
                )));
            }
        };

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the service URL when `url` is present.
    pub fn with_server_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            debug!(%url, "Service URL overridden");
            self.server_url = url;
        }
        self
    }

    /// Loads `path`, then applies the environment and command-line overrides in that order.
    #[instrument(skip(path, flag), fields(path = %path.as_ref().display()))]
    pub fn resolve(path: impl AsRef<Path>, flag: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self::from_file(path)?
            .with_server_url(std::env::var(SERVER_URL_ENV).ok())
            .with_server_url(flag))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
