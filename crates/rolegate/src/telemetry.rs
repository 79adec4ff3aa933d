//! Logging setup for applications and demos.
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once
//! to print them.

use tracing_subscriber::EnvFilter;

/// Installs a formatted `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` is used (for
/// example `"rolegate=debug"`). Calling this more than once is harmless:
/// later calls leave the first subscriber in place.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
