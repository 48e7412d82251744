//! Tracing/logging initialization.
//!
//! JSON lines on stdout, filtered through `RUST_LOG` when it is set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is absent or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Initialize with explicit directives (e.g. `"storefront_checkout=debug"`),
/// ignoring `RUST_LOG`.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

/// The JSON subscriber `init` installs, for scoping with
/// `tracing::subscriber::with_default` instead of installing globally.
pub fn json_subscriber(directives: &str) -> impl ::tracing::Subscriber + Send + Sync + 'static {
    build(EnvFilter::new(directives))
}

fn build(filter: EnvFilter) -> impl ::tracing::Subscriber + Send + Sync + 'static {
    // JSON logs + timestamps.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .finish()
}

fn install(filter: EnvFilter) {
    let _ = build(filter).try_init();
}
