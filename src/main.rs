use anyhow::Result;

use esp32_ws_simulator::config::Settings;
use esp32_ws_simulator::server::{bind, serve, AppState};
use esp32_ws_simulator::shutdown::shutdown_signal;
use esp32_ws_simulator::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Load configuration
    let settings = Settings::new()?;
    tracing::info!("Configuration loaded");

    let state = AppState::new(settings.clone())?;

    let listeners = bind(&settings).await?;

    // Serve until Ctrl+C / SIGTERM
    serve(listeners, state, shutdown_signal()).await?;

    Ok(())
}
