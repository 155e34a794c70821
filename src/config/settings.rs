use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub websocket: WebSocketConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port, `0` picks an ephemeral one
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Shape of the lines written to the console sink
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Label used in the banner, connect notice and message lines
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// chrono format string for the receive timestamp
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Largest accepted message in bytes
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8765
}

fn default_device_name() -> String {
    "ESP32".to_string()
}

fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}

fn default_max_message_size() -> usize {
    1024 * 1024
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // SIMULATOR__SERVER__PORT, SIMULATOR__CONSOLE__DEVICE_NAME, etc.
            .add_source(
                Environment::with_prefix("SIMULATOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Builder pre-populated with the built-in defaults
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("console.device_name", default_device_name())?
            .set_default("console.timestamp_format", default_timestamp_format())?
            .set_default("websocket.max_message_size", default_max_message_size() as i64)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            max_message_size: default_max_message_size(),
        }
    }
}
