//! Application configuration.

use std::str::FromStr;

use tryon_client::TryOnClientConfig;
use tryon_media::MediaConfig;

use crate::error::{CliError, CliResult};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CliError::config(format!("Unknown LOG_FORMAT: {}", other))),
        }
    }
}

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: TryOnClientConfig,
    pub media: MediaConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> CliResult<Self> {
        let log_format = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.parse()?,
            Err(_) => LogFormat::Text,
        };

        Ok(Self {
            client: TryOnClientConfig::from_env()
                .map_err(|e| CliError::config(e.to_string()))?,
            media: MediaConfig::from_env(),
            log_format,
        })
    }
}
