//! Logging init: leveled output on stdout, filter from `RUST_LOG`.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the binary's job and must happen at most once per process.

use tracing_subscriber::EnvFilter;

/// Initialize the process-wide subscriber, writing to standard output.
///
/// Defaults to `info` level when `RUST_LOG` is unset.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .init();
}
