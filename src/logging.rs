// Logging setup
//
// Installs a tracing subscriber filtered by `RUST_LOG`, falling back to
// info-level output for this crate.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "doomgeneric_winit=info";

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed, which is not an
/// error: tests and embedding programs may have set up their own.
pub fn init() -> bool {
    init_with_filter(DEFAULT_FILTER)
}

/// Install the global subscriber with a custom default filter
pub fn init_with_filter(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
