use std::fmt;

use axum::extract::ws::Message;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::config::ConsoleConfig;
use crate::error::{AppError, Result};

/// Data carried by a received frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    /// Displayed as lossy UTF-8 so that text sent in binary frames reads
    /// as plain text; invalid sequences become U+FFFD
    Binary(Vec<u8>),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => f.write_str(text),
            Payload::Binary(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

/// A data frame stamped with its local receive time
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub received_at: DateTime<Local>,
    pub payload: Payload,
}

impl ReceivedMessage {
    pub fn new(payload: Payload, received_at: DateTime<Local>) -> Self {
        Self {
            received_at,
            payload,
        }
    }

    /// Stamp a WebSocket message with the current time.
    ///
    /// Returns `None` for control frames (ping, pong, close).
    pub fn from_ws(message: Message) -> Option<Self> {
        let payload = match message {
            Message::Text(text) => Payload::Text(text.to_string()),
            Message::Binary(bytes) => Payload::Binary(bytes.to_vec()),
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) => return None,
        };
        Some(Self::new(payload, Local::now()))
    }
}

/// Renders the console lines for one device label
#[derive(Debug, Clone)]
pub struct ConsoleFormat {
    device_name: String,
    timestamp_format: String,
}

impl ConsoleFormat {
    /// Rejects timestamp formats chrono cannot render
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        if StrftimeItems::new(&config.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Config(::config::ConfigError::Message(format!(
                "invalid console.timestamp_format: {:?}",
                config.timestamp_format
            ))));
        }

        Ok(Self {
            device_name: config.device_name.clone(),
            timestamp_format: config.timestamp_format.clone(),
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Startup notice, e.g. `ESP32 simulator running on ws://localhost:8765`
    pub fn banner(&self, url: &str) -> String {
        format!("{} simulator running on {}", self.device_name, url)
    }

    pub fn connected(&self) -> String {
        format!("{} simulator connected", self.device_name)
    }

    /// `[HH:MM:SS] ESP32 received: <payload>`
    pub fn received(&self, message: &ReceivedMessage) -> String {
        // Format string was checked in `new`, so rendering cannot fail
        format!(
            "[{}] {} received: {}",
            message.received_at.format(&self.timestamp_format),
            self.device_name,
            message.payload
        )
    }
}

impl Default for ConsoleFormat {
    fn default() -> Self {
        Self {
            device_name: "ESP32".to_string(),
            timestamp_format: "%H:%M:%S".to_string(),
        }
    }
}
