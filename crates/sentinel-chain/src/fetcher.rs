//! Chunked historical log fetching.
//!
//! Startup state rebuilds may cover days to weeks of blocks; a single
//! `get_logs` over such a range exceeds provider limits. The fetcher splits
//! the range into fixed-size windows, queries them sequentially through the
//! resilient reader, and concatenates results in chain order. Windows are
//! disjoint and contiguous by construction, so no deduplication is needed.

use crate::error::{ChainError, ChainResult};
use crate::ports::{LogFilter, LogSource};
use crate::retry::ResilientReader;
use shared_types::LogEvent;
use std::sync::Arc;
use tracing::debug;

/// Default window size in blocks.
pub const DEFAULT_CHUNK_SIZE: u64 = 2000;

/// Fetches event logs over arbitrarily large block ranges.
pub struct ChunkedLogFetcher<S: LogSource> {
    source: Arc<S>,
    reader: ResilientReader,
    chunk_size: u64,
}

impl<S: LogSource> ChunkedLogFetcher<S> {
    /// Fetcher with the default chunk size.
    pub fn new(source: Arc<S>, reader: ResilientReader) -> Self {
        Self::with_chunk_size(source, reader, DEFAULT_CHUNK_SIZE)
    }

    /// Fetcher with a custom chunk size (must be non-zero).
    pub fn with_chunk_size(source: Arc<S>, reader: ResilientReader, chunk_size: u64) -> Self {
        debug_assert!(chunk_size > 0);
        Self {
            source,
            reader,
            chunk_size,
        }
    }

    /// Fetch all logs matching `filter` in `[from_block, to_block]`.
    ///
    /// Sequential, not concurrent: startup backfill is not latency-critical
    /// and sequential windows keep provider rate limits happy.
    pub async fn fetch_logs(
        &self,
        filter: &LogFilter,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<LogEvent>> {
        if from_block > to_block {
            return Err(ChainError::InvalidRange {
                from: from_block,
                to: to_block,
            });
        }

        let mut logs = Vec::new();
        let mut start = from_block;
        while start <= to_block {
            let end = to_block.min(start.saturating_add(self.chunk_size - 1));
            debug!(
                "[sentinel-chain] fetching logs chunk [{}, {}] of [{}, {}]",
                start, end, from_block, to_block
            );
            let description = format!("get_logs(blocks {start}..={end})");
            let chunk = self
                .reader
                .call(&description, || self.source.get_logs(filter, start, end))
                .await?;
            logs.extend(chunk);
            start = end.saturating_add(1);
        }
        Ok(logs)
    }
}
