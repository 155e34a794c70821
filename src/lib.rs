pub mod config;
pub mod connection;
pub mod error;
pub mod server;
pub mod shutdown;
pub mod sink;
pub mod telemetry;
pub mod websocket;
