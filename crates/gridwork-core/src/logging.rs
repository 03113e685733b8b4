//! Tracing setup for Gridwork host binaries.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the given default
/// directive (typically the configured log level). Safe to call once per
/// process; later calls are ignored.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_string()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
