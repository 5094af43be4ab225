//! Member balance classification with per-member cool-down.

use shared_types::{Address, Severity};
use std::collections::BTreeMap;

/// Classify a member's ETH balance against the configured thresholds.
pub fn classify_balance(
    balance_wei: u128,
    info_threshold_wei: u128,
    high_threshold_wei: u128,
) -> Option<Severity> {
    if balance_wei < high_threshold_wei {
        Some(Severity::High)
    } else if balance_wei < info_threshold_wei {
        Some(Severity::Info)
    } else {
        None
    }
}

/// Per-member cool-down between balance findings.
///
/// A member stuck below a threshold would otherwise re-alert on every
/// balance poll for a week straight.
#[derive(Debug, Default)]
pub struct BalanceCooldowns {
    last_alert_at: BTreeMap<Address, u64>,
}

impl BalanceCooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the member is out of cool-down at `now`.
    pub fn ready(&self, member: &Address, now: u64, cooldown_secs: u64) -> bool {
        match self.last_alert_at.get(member) {
            Some(last) => now.saturating_sub(*last) >= cooldown_secs,
            None => true,
        }
    }

    /// Record a balance finding for the member.
    pub fn mark(&mut self, member: Address, now: u64) {
        self.last_alert_at.insert(member, now);
    }
}
