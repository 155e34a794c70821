use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};

use crate::connection::{CloseReason, Connection};
use crate::server::AppState;

use super::message::ReceivedMessage;

/// WebSocket upgrade handler, mounted on every path
#[tracing::instrument(name = "ws.upgrade", skip(ws, state))]
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let connection = Connection::new();
    tracing::debug!(connection_id = %connection.id, "WebSocket upgrade requested");

    ws.max_message_size(state.settings.websocket.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state, connection))
}

/// Read frames until the peer goes away, printing each data frame.
///
/// Nothing is ever sent back to the peer.
#[tracing::instrument(
    name = "ws.connection",
    skip(socket, state, connection),
    fields(connection_id = %connection.id)
)]
async fn handle_socket(mut socket: WebSocket, state: AppState, mut connection: Connection) {
    state.sink.write_line(&state.format.connected());

    let reason = loop {
        match socket.recv().await {
            Some(Ok(Message::Close(frame))) => {
                tracing::debug!(close_frame = ?frame, "Peer sent close frame");
                break CloseReason::PeerClosed;
            }
            Some(Ok(msg)) => {
                if let Some(received) = ReceivedMessage::from_ws(msg) {
                    connection.record_frame();
                    state.sink.write_line(&state.format.received(&received));
                }
            }
            Some(Err(e)) => {
                tracing::debug!(error = %e, "WebSocket read error");
                break CloseReason::TransportError;
            }
            None => break CloseReason::PeerClosed,
        }
    };

    connection.close(reason);
}
