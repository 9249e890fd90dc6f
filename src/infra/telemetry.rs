//! Tracing subscriber setup for the binaries.

use crate::infra::config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Calling it twice is harmless; the second call keeps the first subscriber.
pub fn init() {
    let filter = EnvFilter::try_new(config::log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
