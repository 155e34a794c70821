use std::future::Future;
use std::io;
use std::net::SocketAddr;

use axum::Router;
use futures::future::try_join_all;
use tokio::net::{lookup_host, TcpListener};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::Result;
use crate::websocket::ws_handler;

use super::AppState;

pub fn create_app(state: AppState) -> Router {
    // No path routing: every request is treated as a WebSocket upgrade
    Router::new()
        .fallback(ws_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind every address the configured host resolves to.
///
/// `localhost` usually yields both `127.0.0.1` and `::1`; clients may try
/// either one first. Addresses whose family is unavailable on this host are
/// skipped; any other bind failure is fatal for the process.
pub async fn bind(settings: &Settings) -> Result<Vec<TcpListener>> {
    let mut addrs: Vec<SocketAddr> = Vec::new();
    for addr in lookup_host(settings.server_addr()).await? {
        if !addrs.contains(&addr) {
            addrs.push(addr);
        }
    }

    let mut listeners = Vec::with_capacity(addrs.len());
    let mut port = settings.server.port;
    let mut unavailable = None;

    for mut addr in addrs {
        // With port 0 the first bind picks the port, the rest reuse it
        addr.set_port(port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                port = listener.local_addr()?.port();
                tracing::debug!(addr = %addr, port, "Bound listener");
                listeners.push(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrNotAvailable => {
                tracing::debug!(addr = %addr, error = %e, "Address not available, skipping");
                unavailable = Some(e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if listeners.is_empty() {
        let err = unavailable.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{} resolved to no addresses", settings.server_addr()),
            )
        });
        return Err(err.into());
    }

    Ok(listeners)
}

/// Print the ready banner and serve every listener until `shutdown` resolves
pub async fn serve<F>(listeners: Vec<TcpListener>, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let port = match listeners.first() {
        Some(listener) => listener.local_addr()?.port(),
        None => {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no listeners to serve").into())
        }
    };
    let url = format!("ws://{}:{}", state.settings.server.host, port);

    state.sink.write_line(&state.format.banner(&url));
    for listener in &listeners {
        tracing::info!(addr = %listener.local_addr()?, "Server listening on {}", url);
    }

    // Fan the single shutdown future out to every listener
    let (stop_tx, stop_rx) = watch::channel(false);
    let trigger = tokio::spawn(async move {
        shutdown.await;
        let _ = stop_tx.send(true);
    });

    let app = create_app(state);
    let servers = listeners.into_iter().map(|listener| {
        let app = app.clone();
        let stop = stop_rx.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(wait_for_stop(stop))
                .await
        }
    });

    let result = try_join_all(servers).await;
    trigger.abort();
    result?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn wait_for_stop(mut stop: watch::Receiver<bool>) {
    while !*stop.borrow_and_update() {
        if stop.changed().await.is_err() {
            return;
        }
    }
}
