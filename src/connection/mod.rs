//! Per-connection identity and lifecycle

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Liveness of a single WebSocket session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closed,
}

/// Why a connection left the `Open` state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Peer sent a close frame or the stream ended
    PeerClosed,
    /// Transport-level read error
    TransportError,
}

/// One accepted WebSocket session.
///
/// The id only appears in diagnostics, never in console output.
#[derive(Debug)]
pub struct Connection {
    pub id: Uuid,
    pub connected_at: DateTime<Utc>,
    state: ConnectionState,
    frames_received: u64,
}

impl Connection {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            connected_at: Utc::now(),
            state: ConnectionState::Open,
            frames_received: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    pub fn record_frame(&mut self) {
        self.frames_received += 1;
    }

    /// Transition to `Closed`. Returns false if already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if self.state == ConnectionState::Closed {
            return false;
        }
        self.state = ConnectionState::Closed;

        tracing::debug!(
            connection_id = %self.id,
            reason = ?reason,
            frames_received = self.frames_received,
            duration_ms = (Utc::now() - self.connected_at).num_milliseconds(),
            "Connection closed"
        );
        true
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}
