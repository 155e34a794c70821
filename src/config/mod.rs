mod settings;

pub use settings::{ConsoleConfig, ServerConfig, Settings, WebSocketConfig};
