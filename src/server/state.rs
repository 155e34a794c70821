use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::sink::{ConsoleSink, MessageSink};
use crate::websocket::ConsoleFormat;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub format: Arc<ConsoleFormat>,
    pub sink: Arc<dyn MessageSink>,
}

impl AppState {
    /// State that prints to stdout
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_sink(settings, Arc::new(ConsoleSink))
    }

    pub fn with_sink(settings: Settings, sink: Arc<dyn MessageSink>) -> Result<Self> {
        let format = Arc::new(ConsoleFormat::new(&settings.console)?);

        Ok(Self {
            settings: Arc::new(settings),
            format,
            sink,
        })
    }
}
