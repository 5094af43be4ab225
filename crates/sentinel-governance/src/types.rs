//! Governance domain types and ladder defaults.

use crate::domain::hysteresis::{ThresholdLadder, ThresholdStep};
use serde::{Deserialize, Serialize};
use shared_types::Severity;

/// Dual-governance state as read from the escrow contract.
///
/// Owned exclusively by the governance monitor; re-derived from scratch on
/// process restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceState {
    Normal,
    VetoSignalling,
    VetoSignallingDeactivation,
    VetoCooldown,
    RageQuit,
}

impl GovernanceState {
    /// Human-readable label for findings and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernanceState::Normal => "Normal",
            GovernanceState::VetoSignalling => "VetoSignalling",
            GovernanceState::VetoSignallingDeactivation => "VetoSignallingDeactivation",
            GovernanceState::VetoCooldown => "VetoCooldown",
            GovernanceState::RageQuit => "RageQuit",
        }
    }

    /// States in which the rage-quit support ladder is live: veto
    /// signalling and its rage-quit-eligible successors.
    pub fn rage_quit_eligible(&self) -> bool {
        matches!(
            self,
            GovernanceState::VetoSignalling
                | GovernanceState::VetoSignallingDeactivation
                | GovernanceState::RageQuit
        )
    }
}

/// Immutable escrow configuration snapshot, fetched once at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DualGovernanceConfig {
    /// Support amount that triggers veto signalling (raw token units)
    pub first_seal_support: u128,
    /// Support amount that triggers rage quit (raw token units)
    pub second_seal_support: u128,
    /// Minimum veto signalling duration (seconds)
    pub veto_signalling_min_duration_secs: u64,
    /// Veto cooldown duration (seconds)
    pub veto_cooldown_duration_secs: u64,
}

/// Ladder evaluated while the system is in `Normal`, against
/// `veto_support / first_seal_support`.
pub fn default_veto_signalling_ladder() -> ThresholdLadder {
    ThresholdLadder::new(vec![
        ThresholdStep::new(100.0, Severity::Critical),
        ThresholdStep::new(95.0, Severity::Critical),
        ThresholdStep::new(85.0, Severity::Medium),
        ThresholdStep::new(50.0, Severity::Medium),
        ThresholdStep::new(30.0, Severity::Info),
    ])
}

/// Ladder evaluated while rage quit is reachable, against
/// `rage_quit_support / second_seal_support`.
pub fn default_rage_quit_ladder() -> ThresholdLadder {
    ThresholdLadder::new(vec![
        ThresholdStep::new(100.0, Severity::Critical),
        ThresholdStep::new(95.0, Severity::Critical),
        ThresholdStep::new(85.0, Severity::Medium),
        ThresholdStep::new(50.0, Severity::Medium),
    ])
}
