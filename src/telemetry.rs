//! Tracing setup
//!
//! `RUST_LOG` controls verbosity; without it only warnings are shown.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install the global fmt subscriber. Calling it twice is harmless.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
