//! Configuration management for Bookshelf server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::gelf::Transport;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Remote GELF collector receiving access log entries
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CollectorConfig {
    /// Ship access logs at all
    pub enabled: bool,
    pub transport: Transport,
    pub address: String,
    pub port: u16,
    /// Value of the GELF `host` field
    pub host: String,
    /// Syslog severity attached to every access log message
    pub level: u8,
    /// Entries waiting for the shipper before new ones are dropped
    pub queue_capacity: usize,
    /// Abort startup when the collector cannot be reached
    pub strict_startup: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub collector: CollectorConfig,
}

impl AppConfig {
    /// Load configuration from optional files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKSHELF__COLLECTOR__ADDRESS=10.0.0.5
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl CollectorConfig {
    /// `address:port` of the collector
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            transport: Transport::Tcp,
            address: "172.30.0.1".to_string(),
            port: 12201,
            host: "localhost".to_string(),
            level: 1,
            queue_capacity: 1024,
            strict_startup: false,
        }
    }
}
