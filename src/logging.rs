//! Logging initialisation.
//!
//! Installs a global tracing subscriber writing human-readable lines to both
//! stdout and an append-mode log file. Called once at process start; the
//! level and file path come from [`LoggingConfig`](crate::config::LoggingConfig).

use crate::config::LoggingConfig;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialise the global subscriber. An unrecognised level string falls back
/// to `info` rather than failing the run.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let filter = EnvFilter::try_new(config.log_level.to_lowercase())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}
