// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up tracing_subscriber for the prioritizer.
/// `RUST_LOG` wins when set; otherwise `verbose` picks between debug and info.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete (default level {}).", default_level);
}
