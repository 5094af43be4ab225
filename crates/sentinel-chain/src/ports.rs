//! Driven Ports (outbound dependencies)
//!
//! The raw log-query primitive the hosting provider exposes. Adapters over a
//! concrete RPC client implement `LogSource`; everything above it goes
//! through the resilient reader and the chunked fetcher.

use crate::error::ChainResult;
use async_trait::async_trait;
use shared_types::{Address, Hash, LogEvent};

/// Filter for a historical log query: one contract, one event topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogFilter {
    /// Emitting contract address
    pub address: Address,
    /// Event signature topic
    pub topic: Hash,
}

/// Raw log-query primitive.
///
/// A single call covers one bounded block window; callers must keep windows
/// small enough for provider response-size limits (the chunked fetcher does).
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch decoded logs matching `filter` in the inclusive range
    /// `[from_block, to_block]`, in chain order.
    async fn get_logs(
        &self,
        filter: &LogFilter,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<LogEvent>>;
}
