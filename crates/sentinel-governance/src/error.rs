//! Error types for the governance monitor.

use sentinel_chain::ChainError;
use thiserror::Error;

/// Governance monitor errors
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// A chain read failed after all retries
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// The escrow config could not be interpreted
    #[error("invalid escrow config: {reason}")]
    InvalidConfig { reason: String },
}

/// Result type for governance operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;
