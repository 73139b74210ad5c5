//! Logging infrastructure.
//!
//! The codec itself stays quiet: non-fatal parse notices go through an
//! injectable [`DiagnosticSink`] so that host applications (GUI panels,
//! pipeline job logs) decide where they end up. The convenience entry
//! points in `codec` forward to `tracing::warn!`, and binaries call
//! [`init_tracing`] once at startup to get a subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Callback receiving human-readable diagnostic messages from the codec.
pub type DiagnosticSink = Box<dyn Fn(&str) + Send + Sync>;

/// Initialize the global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG`, falling back to the provided default directive.
/// Should be called once at application startup.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}
