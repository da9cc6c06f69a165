//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr so the game's own
/// output on stdout stays clean.
///
/// The filter comes from `RUST_LOG` and falls back to `default_level`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}
