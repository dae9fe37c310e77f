//! Tracing subscriber setup
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! `LoggingConfig::level`. Output format follows `LoggingConfig::format`.

use tg_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global subscriber
///
/// # Errors
/// Fails if the configured level is not a valid filter directive or a
/// global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().with_target(false).try_init(),
    }
}
