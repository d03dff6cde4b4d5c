use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs a stderr `fmt` subscriber. `RUST_LOG` overrides the configured level.
///
/// Returns `false` when a global subscriber was already set, which leaves the
/// existing one in place.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
