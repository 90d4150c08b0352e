//! Logging init: timestamped tracing output on stderr.

use tracing_subscriber::EnvFilter;

/// Initialize tracing to stderr. Per-segment progress and fatal preconditions
/// are all reported through this subscriber; `RUST_LOG` overrides the default
/// filter.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hlsget_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
