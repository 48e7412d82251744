//! Tracing/logging setup shared by storefront hosts and tests.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide tracing with the default filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize process-wide tracing with explicit filter directives.
pub fn init_with_filter(directives: &str) {
    tracing::init_with_filter(directives);
}

/// Build (without installing) the JSON subscriber for the given directives.
pub fn json_subscriber(directives: &str) -> impl ::tracing::Subscriber + Send + Sync + 'static {
    tracing::json_subscriber(directives)
}
