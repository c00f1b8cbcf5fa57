//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging at `info` unless `RUST_LOG` overrides it.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_filter("info");
}

/// Initialize JSON logging with an explicit fallback filter.
///
/// `RUST_LOG` still wins when set; `default_directives` applies otherwise.
/// Embedders and test harnesses use this to pick their own default level.
pub fn init_with_filter(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .try_init();
}
