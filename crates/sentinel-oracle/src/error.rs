//! Error types for the oracle monitor.

use sentinel_chain::ChainError;
use thiserror::Error;

/// Oracle monitor errors
#[derive(Debug, Error)]
pub enum OracleError {
    /// A chain read failed after all retries
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// The committee has no members; nothing to monitor
    #[error("hash consensus contract reports an empty committee")]
    EmptyCommittee,
}

/// Result type for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;
