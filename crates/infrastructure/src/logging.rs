use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogLevel};

/// Initialize structured logging to stdout. `RUST_LOG` wins over the
/// configured level when set. Call exactly once at startup.
pub fn init_logging(level: LogLevel, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
    }
}
