//! Destinations for console lines.
//!
//! Handlers never write to stdout directly; they go through the
//! [`MessageSink`] carried in the application state. Production uses
//! [`ConsoleSink`], tests swap in a [`ChannelSink`] to observe output.

use std::io::Write;

use tokio::sync::mpsc;

/// Receives fully formatted console lines (without trailing newline)
pub trait MessageSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Writes each line to stdout under the stdout lock
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            tracing::debug!(error = %e, "Failed to write console line");
        }
    }
}

/// Forwards each line into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MessageSink for ChannelSink {
    fn write_line(&self, line: &str) {
        // Receiver gone means nobody is listening anymore
        let _ = self.tx.send(line.to_string());
    }
}
