//! Shared fixtures: scripted gateways for both monitors.

use async_trait::async_trait;
use parking_lot::Mutex;
use sentinel_chain::{ChainError, ChainResult, LogFilter, LogSource};
use sentinel_governance::{DualGovernanceConfig, EscrowGateway, GovernanceState};
use sentinel_oracle::{HashConsensusGateway, ReportReceivedEvent, SubmissionTimes};
use shared_types::{Address, Hash, LogEvent};
use std::collections::BTreeMap;

pub const ONE_ETH: u128 = 1_000_000_000_000_000_000;

pub fn addr(n: u8) -> Address {
    let mut a = [0u8; 20];
    a[0] = n;
    a
}

pub fn hash(n: u8) -> Hash {
    let mut h = [0u8; 32];
    h[0] = n;
    h
}

/// Scripted escrow contract.
pub struct ScriptedEscrow {
    pub config: DualGovernanceConfig,
    pub state: Mutex<GovernanceState>,
    pub rage_quit_support: Mutex<u128>,
    pub veto_support: Mutex<u128>,
    pub fail_reads: Mutex<bool>,
}

impl ScriptedEscrow {
    pub fn new(first_seal: u128, second_seal: u128) -> Self {
        Self {
            config: DualGovernanceConfig {
                first_seal_support: first_seal,
                second_seal_support: second_seal,
                veto_signalling_min_duration_secs: 3_600,
                veto_cooldown_duration_secs: 3_600,
            },
            state: Mutex::new(GovernanceState::Normal),
            rage_quit_support: Mutex::new(0),
            veto_support: Mutex::new(0),
            fail_reads: Mutex::new(false),
        }
    }
}

#[async_trait]
impl EscrowGateway for ScriptedEscrow {
    async fn get_config(&self) -> ChainResult<DualGovernanceConfig> {
        Ok(self.config)
    }

    async fn get_governance_state(&self, _block: u64) -> ChainResult<GovernanceState> {
        if *self.fail_reads.lock() {
            return Err(ChainError::rpc("provider unavailable"));
        }
        Ok(*self.state.lock())
    }

    async fn get_rage_quit_support(&self, _block: u64) -> ChainResult<u128> {
        if *self.fail_reads.lock() {
            return Err(ChainError::rpc("provider unavailable"));
        }
        Ok(*self.rage_quit_support.lock())
    }

    async fn get_veto_signalling_support(&self, _block: u64) -> ChainResult<u128> {
        if *self.fail_reads.lock() {
            return Err(ChainError::rpc("provider unavailable"));
        }
        Ok(*self.veto_support.lock())
    }
}

/// Scripted hash-consensus contract with a byte-encoded event history so
/// the chunked backfill path runs for real.
pub struct ScriptedConsensus {
    pub members: Vec<Address>,
    pub fast_lane: Mutex<Vec<Address>>,
    pub balances: Mutex<BTreeMap<Address, u128>>,
    pub times: Mutex<SubmissionTimes>,
    pub history: Mutex<Vec<ReportReceivedEvent>>,
}

impl ScriptedConsensus {
    pub fn new(members: Vec<Address>) -> Self {
        Self {
            members,
            fast_lane: Mutex::new(Vec::new()),
            balances: Mutex::new(BTreeMap::new()),
            times: Mutex::new(SubmissionTimes::default()),
            history: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HashConsensusGateway for ScriptedConsensus {
    async fn get_members(&self) -> ChainResult<Vec<Address>> {
        Ok(self.members.clone())
    }

    async fn get_fast_lane_members(&self) -> ChainResult<Vec<Address>> {
        Ok(self.fast_lane.lock().clone())
    }

    async fn get_balance(&self, member: Address, _block: u64) -> ChainResult<u128> {
        Ok(*self.balances.lock().get(&member).unwrap_or(&ONE_ETH))
    }

    async fn get_last_submission_times(&self, _block: u64) -> ChainResult<SubmissionTimes> {
        Ok(*self.times.lock())
    }

    fn report_received_filter(&self) -> LogFilter {
        LogFilter {
            address: [9u8; 20],
            topic: [3u8; 32],
        }
    }

    fn decode_report_received(&self, log: &LogEvent) -> Option<ReportReceivedEvent> {
        if log.data.len() != 60 {
            return None;
        }
        let mut member = [0u8; 20];
        member.copy_from_slice(&log.data[..20]);
        let ref_slot = u64::from_be_bytes(log.data[20..28].try_into().ok()?);
        let mut report_hash = [0u8; 32];
        report_hash.copy_from_slice(&log.data[28..60]);
        Some(ReportReceivedEvent {
            member,
            ref_slot,
            report_hash,
            block_number: log.block_number,
        })
    }
}

#[async_trait]
impl LogSource for ScriptedConsensus {
    async fn get_logs(
        &self,
        filter: &LogFilter,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<LogEvent>> {
        Ok(self
            .history
            .lock()
            .iter()
            .filter(|e| e.block_number >= from_block && e.block_number <= to_block)
            .map(|e| {
                let mut data = Vec::with_capacity(60);
                data.extend_from_slice(&e.member);
                data.extend_from_slice(&e.ref_slot.to_be_bytes());
                data.extend_from_slice(&e.report_hash);
                LogEvent {
                    address: filter.address,
                    block_number: e.block_number,
                    topic: filter.topic,
                    data,
                }
            })
            .collect())
    }
}
