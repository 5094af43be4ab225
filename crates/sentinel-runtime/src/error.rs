//! Error types for the runtime.

use thiserror::Error;

/// Fatal initialization errors; everything downstream is unusable without
/// valid initial state, so the composition root lets these exit the process.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Startup failed (config fetch, logging init)
    #[error("fatal initialization error: {reason}")]
    FatalInit { reason: String },

    /// Network id does not map to a known constant table
    #[error("unknown network id: {id}")]
    UnknownNetwork { id: String },
}

/// A monitor handler failed; the supervisor retries and eventually degrades
/// this to an error finding rather than crashing sibling monitors.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitor '{monitor}' failed: {reason}")]
    Failed { monitor: String, reason: String },
}
