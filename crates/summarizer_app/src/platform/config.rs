use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{LogDestination, LogSettings};
use log::LevelFilter;
use serde::Deserialize;
use summarizer_engine::ClientSettings;
use thiserror::Error;
use url::Url;

pub const CONFIG_FILENAME: &str = "summarizer.ron";
pub const CONFIG_PATH_ENV: &str = "SUMMARIZER_CONFIG";
pub const ENDPOINT_ENV: &str = "SUMMARIZER_BACKEND_URL";
pub const LOG_FILENAME: &str = "summarizer.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.endpoint,
            connect_timeout_ms: duration_ms(client.connect_timeout),
            request_timeout_ms: duration_ms(client.request_timeout),
            log_file: Path::new(".").join(LOG_FILENAME),
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    /// Loads `$SUMMARIZER_CONFIG` (must exist) or `./summarizer.ron` (optional),
    /// then applies the `$SUMMARIZER_BACKEND_URL` override.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(CONFIG_FILENAME), false),
        };
        Self::load_from(&path, required, env::var(ENDPOINT_ENV).ok())
    }

    pub fn load_from(
        path: &Path,
        required: bool,
        endpoint_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(text) => ron::from_str::<AppConfig>(&text).map_err(|err| ConfigError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                AppConfig::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Some(endpoint) = endpoint_override {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                config.endpoint = endpoint.to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };
        let url = Url::parse(&self.endpoint).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            destination: LogDestination::File(self.log_file.clone()),
            level: self.log_level.into(),
        }
    }

    /// Used when the configured log file cannot be created.
    pub fn fallback_log_settings(&self) -> LogSettings {
        LogSettings {
            destination: LogDestination::File(env::temp_dir().join(LOG_FILENAME)),
            level: self.log_level.into(),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
