//! Driven Ports (outbound dependencies)
//!
//! Read-only view of the hash-consensus contract plus the event-decoding
//! glue the adapter owns (ABI details never reach the service).

use crate::types::{ReportReceivedEvent, SubmissionTimes};
use async_trait::async_trait;
use sentinel_chain::{ChainResult, LogFilter};
use shared_types::{Address, LogEvent};

/// Read-only view of the oracle committee's hash-consensus contract.
#[async_trait]
pub trait HashConsensusGateway: Send + Sync {
    /// Full committee member list.
    async fn get_members(&self) -> ChainResult<Vec<Address>>;

    /// Members currently privileged to report early. The returned set fully
    /// replaces any cached one.
    async fn get_fast_lane_members(&self) -> ChainResult<Vec<Address>>;

    /// ETH balance of a member at `block` (wei).
    async fn get_balance(&self, member: Address, block: u64) -> ChainResult<u128>;

    /// Timestamps of the last successful main-data and extra-data
    /// submissions as of `block`.
    async fn get_last_submission_times(&self, block: u64) -> ChainResult<SubmissionTimes>;

    /// Log filter matching the contract's `ReportReceived` events.
    fn report_received_filter(&self) -> LogFilter;

    /// Decode a raw log into a `ReportReceived` event; `None` for logs that
    /// match the filter topic but fail to decode.
    fn decode_report_received(&self, log: &LogEvent) -> Option<ReportReceivedEvent>;
}
