//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(log_level: &str, verbose: bool) -> &str {
    if verbose { "debug" } else { log_level }
}

/// Install the global fmt subscriber. `RUST_LOG` takes precedence over the
/// command-line level.
pub fn init(log_level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[cfg(test)]
#[path = "logging/logging_tests.rs"]
mod logging_tests;
