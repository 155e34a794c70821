//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so that stdout carries only the console
//! message log. Verbosity follows `RUST_LOG` (default `info`); per
//! connection lifecycle events are emitted at `debug`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
