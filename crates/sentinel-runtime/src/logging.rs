//! Logging setup.
//!
//! Level filter comes from `SENTINEL_LOG_LEVEL` (default `info`);
//! `SENTINEL_LOG_JSON=1` switches to JSON-formatted output for log
//! shipping.

use crate::error::RuntimeError;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the level filter.
pub const LOG_LEVEL_ENV: &str = "SENTINEL_LOG_LEVEL";
/// Environment variable toggling JSON output.
pub const LOG_JSON_ENV: &str = "SENTINEL_LOG_JSON";

/// Install the global `tracing` subscriber. Call once at process start;
/// failure here is fatal like any other initialization failure.
pub fn init_logging() -> Result<(), RuntimeError> {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_JSON_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| RuntimeError::FatalInit {
        reason: format!("logging init failed: {e}"),
    })
}
