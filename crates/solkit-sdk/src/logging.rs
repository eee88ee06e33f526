//! Logging bootstrap for binaries and tests built on the workspace.
//!
//! Nothing in the workspace installs a subscriber implicitly; callers opt in
//! exactly once, and `RUST_LOG` always wins over the directive passed here.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber at `info` level.
pub fn init() {
    init_with_filter("info");
}

/// Install the global `tracing` subscriber with the given default filter
/// directives (e.g. `"solkit_tx=debug,info"`). Safe to call more than once;
/// only the first call takes effect.
pub fn init_with_filter(directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
