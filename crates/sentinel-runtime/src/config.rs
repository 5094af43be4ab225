//! Per-network constant tables.
//!
//! Explicitly constructed per network id and loaded once at process start;
//! immutable afterwards. An optional JSON override file replaces the whole
//! table, never parts of it.

use crate::error::RuntimeError;
use sentinel_governance::{ThresholdLadder, ThresholdStep};
use sentinel_oracle::OracleMonitorConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Severity};
use std::path::Path;
use std::str::FromStr;

/// Supported networks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Holesky,
}

impl FromStr for Network {
    type Err = RuntimeError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "holesky" => Ok(Network::Holesky),
            _ => Err(RuntimeError::UnknownNetwork { id: id.to_string() }),
        }
    }
}

/// One threshold ladder rung as plain configuration data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LadderStep {
    pub level_percent: f64,
    pub severity: Severity,
}

/// Display name for a committee member address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberName {
    pub address: Address,
    pub name: String,
}

/// The full constant table for one network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network: Network,
    /// Dual-governance escrow contract
    pub escrow_address: Address,
    /// Oracle hash-consensus contract
    pub hash_consensus_address: Address,
    pub veto_signalling_ladder: Vec<LadderStep>,
    pub rage_quit_ladder: Vec<LadderStep>,
    pub member_names: Vec<MemberName>,
    pub sloppy_distance_blocks: u64,
    pub very_sloppy_distance_blocks: u64,
    pub balance_check_interval_blocks: u64,
    pub balance_info_threshold_wei: u64,
    pub balance_high_threshold_wei: u64,
    pub balance_cooldown_secs: u64,
    pub max_main_data_gap_secs: u64,
    pub max_extra_data_gap_secs: u64,
    pub overdue_trigger_period_secs: u64,
    pub overdue_critical_every: u32,
}

const MAINNET_ESCROW: Address = [
    0x3e, 0x40, 0xd7, 0x3e, 0xb9, 0x77, 0xdc, 0x6a, 0x53, 0x7a, 0xf5, 0x87, 0xd4, 0x8c, 0xf5,
    0x44, 0xb0, 0x96, 0x3c, 0x50,
];
const MAINNET_HASH_CONSENSUS: Address = [
    0xd6, 0x24, 0xb0, 0x8c, 0x83, 0xba, 0xec, 0xf0, 0x80, 0x7d, 0xd2, 0xc6, 0x88, 0x0c, 0x31,
    0x54, 0xa5, 0xf0, 0xb2, 0x88,
];
const HOLESKY_ESCROW: Address = [
    0x1f, 0x0a, 0x2a, 0x3c, 0x47, 0x55, 0x6b, 0x7e, 0x86, 0x90, 0x9a, 0xa4, 0xb1, 0xbe, 0xc8,
    0xd3, 0xdd, 0xe8, 0xf2, 0x0a,
];
const HOLESKY_HASH_CONSENSUS: Address = [
    0xa0, 0x67, 0xfc, 0x95, 0xc2, 0x2d, 0x51, 0xc3, 0xbc, 0x35, 0xfd, 0x4b, 0xe3, 0x72, 0x94,
    0x19, 0xb0, 0x7d, 0xc3, 0x85,
];

fn default_veto_steps() -> Vec<LadderStep> {
    vec![
        LadderStep { level_percent: 100.0, severity: Severity::Critical },
        LadderStep { level_percent: 95.0, severity: Severity::Critical },
        LadderStep { level_percent: 85.0, severity: Severity::Medium },
        LadderStep { level_percent: 50.0, severity: Severity::Medium },
        LadderStep { level_percent: 30.0, severity: Severity::Info },
    ]
}

fn default_rage_quit_steps() -> Vec<LadderStep> {
    vec![
        LadderStep { level_percent: 100.0, severity: Severity::Critical },
        LadderStep { level_percent: 95.0, severity: Severity::Critical },
        LadderStep { level_percent: 85.0, severity: Severity::Medium },
        LadderStep { level_percent: 50.0, severity: Severity::Medium },
    ]
}

impl NetworkConfig {
    /// Constant table for a network.
    pub fn for_network(network: Network) -> Self {
        let (escrow_address, hash_consensus_address, member_names) = match network {
            Network::Mainnet => (
                MAINNET_ESCROW,
                MAINNET_HASH_CONSENSUS,
                vec![
                    MemberName {
                        address: [
                            0x14, 0x0b, 0xd8, 0xfb, 0xdc, 0x1f, 0x85, 0x4a, 0x1a, 0x36, 0xc7,
                            0x9b, 0xd3, 0xc7, 0x02, 0x18, 0x7b, 0x9b, 0x46, 0x1d,
                        ],
                        name: "Chorus One".to_string(),
                    },
                    MemberName {
                        address: [
                            0x40, 0x4b, 0x42, 0xb3, 0x2c, 0x68, 0x3f, 0x75, 0x46, 0x4b, 0x6f,
                            0x6e, 0xde, 0x22, 0xbe, 0xa1, 0x4f, 0x98, 0xef, 0x8c,
                        ],
                        name: "Staking Facilities".to_string(),
                    },
                    MemberName {
                        address: [
                            0x94, 0x6d, 0x3b, 0x08, 0x1e, 0xd1, 0x9d, 0xd1, 0x2f, 0xc0, 0xb1,
                            0x68, 0x1a, 0x5f, 0xb9, 0xfd, 0xde, 0x51, 0x74, 0x5b,
                        ],
                        name: "P2P Validator".to_string(),
                    },
                ],
            ),
            Network::Holesky => (HOLESKY_ESCROW, HOLESKY_HASH_CONSENSUS, Vec::new()),
        };
        Self {
            network,
            escrow_address,
            hash_consensus_address,
            veto_signalling_ladder: default_veto_steps(),
            rage_quit_ladder: default_rage_quit_steps(),
            member_names,
            sloppy_distance_blocks: 50_400,
            very_sloppy_distance_blocks: 100_800,
            balance_check_interval_blocks: 300,
            balance_info_threshold_wei: 500_000_000_000_000_000,
            balance_high_threshold_wei: 150_000_000_000_000_000,
            balance_cooldown_secs: 604_800,
            max_main_data_gap_secs: 87_300,
            max_extra_data_gap_secs: 88_200,
            overdue_trigger_period_secs: 3_600,
            overdue_critical_every: 4,
        }
    }

    /// Resolve a network id string to its constant table.
    pub fn from_id(id: &str) -> Result<Self, RuntimeError> {
        Ok(Self::for_network(Network::from_str(id)?))
    }

    /// Parse a full override table from JSON.
    pub fn from_json(json: &str) -> Result<Self, RuntimeError> {
        serde_json::from_str(json).map_err(|e| RuntimeError::FatalInit {
            reason: format!("config parse failed: {e}"),
        })
    }

    /// Load a full override table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, RuntimeError> {
        let json = std::fs::read_to_string(path).map_err(|e| RuntimeError::FatalInit {
            reason: format!("config file {}: {e}", path.display()),
        })?;
        Self::from_json(&json)
    }

    /// Veto-signalling ladder in monitor form.
    pub fn veto_signalling_ladder(&self) -> ThresholdLadder {
        ladder(&self.veto_signalling_ladder)
    }

    /// Rage-quit ladder in monitor form.
    pub fn rage_quit_ladder(&self) -> ThresholdLadder {
        ladder(&self.rage_quit_ladder)
    }

    /// Oracle monitor configuration for this network.
    pub fn oracle_config(&self) -> OracleMonitorConfig {
        OracleMonitorConfig {
            sloppy_distance_blocks: self.sloppy_distance_blocks,
            very_sloppy_distance_blocks: self.very_sloppy_distance_blocks,
            balance_check_interval_blocks: self.balance_check_interval_blocks,
            balance_info_threshold_wei: u128::from(self.balance_info_threshold_wei),
            balance_high_threshold_wei: u128::from(self.balance_high_threshold_wei),
            balance_cooldown_secs: self.balance_cooldown_secs,
            max_main_data_gap_secs: self.max_main_data_gap_secs,
            max_extra_data_gap_secs: self.max_extra_data_gap_secs,
            overdue_trigger_period_secs: self.overdue_trigger_period_secs,
            overdue_critical_every: self.overdue_critical_every,
            member_names: self
                .member_names
                .iter()
                .map(|m| (m.address, m.name.clone()))
                .collect(),
        }
    }
}

fn ladder(steps: &[LadderStep]) -> ThresholdLadder {
    ThresholdLadder::new(
        steps
            .iter()
            .map(|s| ThresholdStep::new(s.level_percent, s.severity))
            .collect(),
    )
}
