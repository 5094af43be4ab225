//! Oracle domain types and monitor configuration.

use shared_types::{Address, Hash};
use std::collections::BTreeMap;

/// Last report observed from one committee member.
///
/// One row per member; rows are never deleted, members only become sloppy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberReport {
    /// Consensus-layer reference slot the report pertains to
    pub ref_slot: u64,
    /// Submitted report hash
    pub report_hash: Hash,
    /// Block the submission was observed in
    pub block_number: u64,
}

/// Decoded `ReportReceived` event from the hash-consensus contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportReceivedEvent {
    /// Reporting member
    pub member: Address,
    /// Reference slot
    pub ref_slot: u64,
    /// Report hash
    pub report_hash: Hash,
    /// Block the event was emitted in
    pub block_number: u64,
}

/// Timestamps of the last successful on-chain submissions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmissionTimes {
    /// Last main-data submission (unix seconds)
    pub main_data_at: u64,
    /// Last extra-data submission (unix seconds)
    pub extra_data_at: u64,
}

/// Static configuration for the oracle monitor.
#[derive(Clone, Debug)]
pub struct OracleMonitorConfig {
    /// Fast-lane members are expected to report within this many blocks
    /// (about one week)
    pub sloppy_distance_blocks: u64,
    /// Any member silent for this many blocks is reported (about two weeks)
    pub very_sloppy_distance_blocks: u64,
    /// How often member balances are polled, in blocks
    pub balance_check_interval_blocks: u64,
    /// Balance below this is an Info finding (wei)
    pub balance_info_threshold_wei: u128,
    /// Balance below this is a High finding (wei)
    pub balance_high_threshold_wei: u128,
    /// Per-member cool-down between balance findings (seconds, one week)
    pub balance_cooldown_secs: u64,
    /// Maximum tolerated gap since the last main-data submission (seconds)
    pub max_main_data_gap_secs: u64,
    /// Maximum tolerated gap since the last extra-data submission (seconds)
    pub max_extra_data_gap_secs: u64,
    /// Cool-down between overdue findings (seconds)
    pub overdue_trigger_period_secs: u64,
    /// Every Nth overdue finding escalates to Critical
    pub overdue_critical_every: u32,
    /// Display names for known committee members
    pub member_names: BTreeMap<Address, String>,
}

impl Default for OracleMonitorConfig {
    fn default() -> Self {
        Self {
            // ~12s blocks: one week and two weeks respectively
            sloppy_distance_blocks: 50_400,
            very_sloppy_distance_blocks: 100_800,
            balance_check_interval_blocks: 300,
            balance_info_threshold_wei: 500_000_000_000_000_000, // 0.5 ETH
            balance_high_threshold_wei: 150_000_000_000_000_000, // 0.15 ETH
            balance_cooldown_secs: 604_800,
            max_main_data_gap_secs: 86_400 + 900,
            max_extra_data_gap_secs: 86_400 + 1_800,
            overdue_trigger_period_secs: 3_600,
            overdue_critical_every: 4,
            member_names: BTreeMap::new(),
        }
    }
}

impl OracleMonitorConfig {
    /// Display name for a member, falling back to a shortened address.
    pub fn member_name(&self, member: &Address) -> String {
        self.member_names
            .get(member)
            .cloned()
            .unwrap_or_else(|| shared_types::short_hex(member))
    }
}
