//! Error types for chain access.

use thiserror::Error;

/// Chain access errors
#[derive(Debug, Error)]
pub enum ChainError {
    /// A single RPC attempt failed (adapters produce this; the resilient
    /// reader consumes it and retries)
    #[error("RPC call failed: {message}")]
    Rpc { message: String },

    /// All retry attempts exhausted
    #[error("network error after {attempts} attempts ({context}): {cause}")]
    Network {
        context: String,
        attempts: u32,
        cause: String,
    },

    /// Log fetch asked for an inverted block range
    #[error("invalid block range: from {from} > to {to}")]
    InvalidRange { from: u64, to: u64 },
}

impl ChainError {
    /// Shorthand for adapter-level failures.
    pub fn rpc(message: impl Into<String>) -> Self {
        ChainError::Rpc {
            message: message.into(),
        }
    }
}

/// Result type for chain operations
pub type ChainResult<T> = Result<T, ChainError>;
