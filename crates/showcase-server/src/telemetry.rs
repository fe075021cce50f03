//! Logging setup
//!
//! Filter comes from `RUST_LOG`, falling back to `info` with request traces.

use crate::config::LogFormat;
use crate::error::ServerError;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Install the global subscriber
///
/// # Errors
/// - `ServerError::Telemetry` if a subscriber is already installed
pub fn init(format: LogFormat) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| ServerError::Telemetry(e.to_string()))
}
