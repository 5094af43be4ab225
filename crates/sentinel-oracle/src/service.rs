//! Oracle Report Consensus Monitor.

use crate::domain::balances::{classify_balance, BalanceCooldowns};
use crate::domain::liveness::{classify_distance, LivenessThresholds};
use crate::domain::overdue::{OverdueKind, OverdueTracker};
use crate::domain::reports::{Disagreement, ReportLedger};
use crate::error::{OracleError, OracleResult};
use crate::ports::outbound::HashConsensusGateway;
use crate::types::{MemberReport, OracleMonitorConfig, ReportReceivedEvent};
use futures::future::join_all;
use parking_lot::RwLock;
use sentinel_chain::{ChunkedLogFetcher, LogSource, ResilientReader};
use shared_types::{short_hash, Address, BlockRef, Finding, FindingType, Severity};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mutable monitor state behind the per-instance lock.
struct OracleMonitorState {
    /// Known committee members (grown on first observation, never shrunk)
    members: Vec<Address>,
    /// Members currently privileged to report early; fully replaced on
    /// every refresh
    fast_lane: BTreeSet<Address>,
    /// Per-member last observed report
    ledger: ReportLedger,
    /// Per-member balance alert cool-downs
    cooldowns: BalanceCooldowns,
    /// Overdue-submission tracking
    overdue: OverdueTracker,
    /// Block the historical backfill started at; silence is measured from
    /// here for members with no recorded report
    observation_start_block: u64,
    /// Last block a balance poll ran at
    last_balance_check_block: u64,
}

/// Observes the oracle committee's hash-consensus process: disagreement,
/// staleness, member funding, and overdue aggregated submissions.
pub struct OracleConsensusMonitor<G: HashConsensusGateway + LogSource> {
    gateway: Arc<G>,
    reader: ResilientReader,
    config: OracleMonitorConfig,
    state: RwLock<OracleMonitorState>,
}

impl<G: HashConsensusGateway + LogSource> OracleConsensusMonitor<G> {
    /// Build the monitor and reconstruct per-member state from history.
    ///
    /// Backfills the report ledger over the very-sloppy window via the
    /// chunked fetcher; blocks readiness until the backfill completes.
    pub async fn initialize(
        gateway: Arc<G>,
        reader: ResilientReader,
        config: OracleMonitorConfig,
        current: &BlockRef,
    ) -> OracleResult<Self> {
        let members = reader
            .call("get_members()", || gateway.get_members())
            .await?;
        if members.is_empty() {
            return Err(OracleError::EmptyCommittee);
        }
        let fast_lane: BTreeSet<Address> = reader
            .call("get_fast_lane_members()", || {
                gateway.get_fast_lane_members()
            })
            .await?
            .into_iter()
            .collect();

        let from_block = current
            .number
            .saturating_sub(config.very_sloppy_distance_blocks);
        let fetcher = ChunkedLogFetcher::new(gateway.clone(), reader);
        let filter = gateway.report_received_filter();
        let logs = fetcher
            .fetch_logs(&filter, from_block, current.number)
            .await?;

        let mut ledger = ReportLedger::new();
        for log in &logs {
            if let Some(event) = gateway.decode_report_received(log) {
                // Backfill only populates rows; historical disagreement is
                // not re-alerted.
                let _ = ledger.record(
                    event.member,
                    MemberReport {
                        ref_slot: event.ref_slot,
                        report_hash: event.report_hash,
                        block_number: event.block_number,
                    },
                    members.len(),
                );
            }
        }
        info!(
            "[sentinel-oracle] initialized: {} members, {} with reports in blocks [{}, {}]",
            members.len(),
            ledger.len(),
            from_block,
            current.number
        );

        let times = reader
            .call(
                &format!("get_last_submission_times(block {})", current.number),
                || gateway.get_last_submission_times(current.number),
            )
            .await?;
        let mut overdue = OverdueTracker::new(current.timestamp);
        overdue.note_submissions(times.main_data_at, times.extra_data_at);

        Ok(Self {
            gateway,
            reader,
            config,
            state: RwLock::new(OracleMonitorState {
                members,
                fast_lane,
                ledger,
                cooldowns: BalanceCooldowns::new(),
                overdue,
                observation_start_block: from_block,
                last_balance_check_block: 0,
            }),
        })
    }

    /// One member submitted a report for the current reference slot.
    pub fn handle_report_received(&self, event: &ReportReceivedEvent) -> Vec<Finding> {
        let mut state = self.state.write();
        if !state.members.contains(&event.member) {
            debug!(
                "[sentinel-oracle] report from previously unknown member {}",
                self.config.member_name(&event.member)
            );
            state.members.push(event.member);
        }
        let total_members = state.members.len();
        let outcome = state.ledger.record(
            event.member,
            MemberReport {
                ref_slot: event.ref_slot,
                report_hash: event.report_hash,
                block_number: event.block_number,
            },
            total_members,
        );
        match outcome {
            Some(disagreement) => vec![self.disagreement_finding(&disagreement, event.ref_slot)],
            None => Vec::new(),
        }
    }

    /// Quorum was reached and the aggregated report landed on-chain:
    /// refresh the fast-lane set, then sweep every member for staleness.
    pub async fn handle_report_submitted(&self, block: &BlockRef) -> Vec<Finding> {
        let fast_lane = match self
            .reader
            .call("get_fast_lane_members()", || {
                self.gateway.get_fast_lane_members()
            })
            .await
        {
            Ok(members) => members,
            Err(e) => {
                warn!(
                    "[sentinel-oracle] fast lane refresh failed at block {}: {}",
                    block.number, e
                );
                return vec![Finding::network_error(
                    format!("get_fast_lane_members(block {})", block.number),
                    e.to_string(),
                )];
            }
        };

        let thresholds = LivenessThresholds {
            sloppy_blocks: self.config.sloppy_distance_blocks,
            very_sloppy_blocks: self.config.very_sloppy_distance_blocks,
        };

        let mut state = self.state.write();
        state.fast_lane = fast_lane.into_iter().collect();
        state.overdue.note_main_data(block.timestamp);

        let mut findings = Vec::new();
        for member in state.members.clone() {
            let last_block = state
                .ledger
                .get(&member)
                .map(|r| r.block_number)
                .unwrap_or(state.observation_start_block);
            let distance = block.number.saturating_sub(last_block);
            let in_fast_lane = state.fast_lane.contains(&member);
            if let Some(severity) = classify_distance(distance, in_fast_lane, &thresholds) {
                findings.push(self.sloppy_finding(&member, distance, severity, in_fast_lane, block));
            }
        }
        findings
    }

    /// Extra-data part of the aggregated report landed on-chain.
    pub fn handle_extra_data_submitted(&self, block: &BlockRef) {
        self.state.write().overdue.note_extra_data(block.timestamp);
    }

    /// Per-block evaluation: balance polling and overdue detection.
    pub async fn handle_block(&self, block: &BlockRef) -> Vec<Finding> {
        let mut findings = self.check_balances(block).await;
        findings.extend(self.check_overdue(block).await);
        findings
    }

    /// Poll member balances on the configured interval, cool-down gated.
    async fn check_balances(&self, block: &BlockRef) -> Vec<Finding> {
        let members: Vec<Address> = {
            let mut state = self.state.write();
            let since_last = block
                .number
                .saturating_sub(state.last_balance_check_block);
            if since_last < self.config.balance_check_interval_blocks {
                return Vec::new();
            }
            state.last_balance_check_block = block.number;
            state.members.clone()
        };

        // Fan out: bounded by the slowest single read, not their sum.
        let reads = members.iter().map(|member| {
            let member = *member;
            async move {
                let description = format!(
                    "get_balance({}, block {})",
                    shared_types::short_hex(&member),
                    block.number
                );
                let balance = self
                    .reader
                    .call(&description, || self.gateway.get_balance(member, block.number))
                    .await;
                (member, description, balance)
            }
        });
        let results = join_all(reads).await;

        let mut findings = Vec::new();
        let mut state = self.state.write();
        for (member, description, balance) in results {
            let balance = match balance {
                Ok(b) => b,
                Err(e) => {
                    findings.push(Finding::network_error(description, e.to_string()));
                    continue;
                }
            };
            let severity = classify_balance(
                balance,
                self.config.balance_info_threshold_wei,
                self.config.balance_high_threshold_wei,
            );
            if let Some(severity) = severity {
                if state
                    .cooldowns
                    .ready(&member, block.timestamp, self.config.balance_cooldown_secs)
                {
                    state.cooldowns.mark(member, block.timestamp);
                    findings.push(self.balance_finding(&member, balance, severity, block));
                }
            }
        }
        findings
    }

    /// Overdue-submission detection with re-verification.
    async fn check_overdue(&self, block: &BlockRef) -> Vec<Finding> {
        let due = self.state.read().overdue.check(
            block.timestamp,
            self.config.max_main_data_gap_secs,
            self.config.max_extra_data_gap_secs,
            self.config.overdue_trigger_period_secs,
        );
        if due.is_none() {
            return Vec::new();
        }

        // Re-verify against fresh history first: a missed submission event
        // must not page anyone.
        let times = match self
            .reader
            .call(
                &format!("get_last_submission_times(block {})", block.number),
                || self.gateway.get_last_submission_times(block.number),
            )
            .await
        {
            Ok(times) => times,
            Err(e) => {
                warn!(
                    "[sentinel-oracle] overdue re-verification failed at block {}: {}",
                    block.number, e
                );
                return vec![Finding::network_error(
                    format!("get_last_submission_times(block {})", block.number),
                    e.to_string(),
                )];
            }
        };

        let mut state = self.state.write();
        state
            .overdue
            .note_submissions(times.main_data_at, times.extra_data_at);
        let confirmed = state.overdue.check(
            block.timestamp,
            self.config.max_main_data_gap_secs,
            self.config.max_extra_data_gap_secs,
            self.config.overdue_trigger_period_secs,
        );
        let Some(kind) = confirmed else {
            debug!(
                "[sentinel-oracle] overdue suspicion cleared by re-verification at block {}",
                block.number
            );
            return Vec::new();
        };

        let severity = state
            .overdue
            .record_alert(block.timestamp, self.config.overdue_critical_every);
        let last_at = match kind {
            OverdueKind::MainData => state.overdue.last_main_data_at(),
            OverdueKind::ExtraData => times.extra_data_at,
        };
        vec![self.overdue_finding(kind, severity, last_at, block)]
    }

    fn disagreement_finding(&self, disagreement: &Disagreement, ref_slot: u64) -> Finding {
        let reporter = self.config.member_name(&disagreement.reporter);
        let peer = self.config.member_name(&disagreement.conflicting_member);
        Finding::new(
            "Oracle report disagreement",
            format!(
                "{} reported an alternative hash {} for ref slot {} \
                 (expected {} as reported by {}; {} of {} reports received)",
                reporter,
                short_hash(&disagreement.reported_hash),
                ref_slot,
                short_hash(&disagreement.conflicting_hash),
                peer,
                disagreement.received,
                disagreement.total_members,
            ),
            "ORACLE-REPORT-DISAGREEMENT",
            Severity::Medium,
            FindingType::Suspicious,
        )
        .with_metadata("reporter", reporter)
        .with_metadata("reported_hash", short_hash(&disagreement.reported_hash))
        .with_metadata("conflicting_hash", short_hash(&disagreement.conflicting_hash))
        .with_metadata("ref_slot", ref_slot.to_string())
        .with_metadata("reports_received", disagreement.received.to_string())
        .with_metadata("committee_size", disagreement.total_members.to_string())
    }

    fn sloppy_finding(
        &self,
        member: &Address,
        distance: u64,
        severity: Severity,
        in_fast_lane: bool,
        block: &BlockRef,
    ) -> Finding {
        let name = self.config.member_name(member);
        let (title, alert_id) = if severity == Severity::Medium {
            ("Oracle member very sloppy", "ORACLE-MEMBER-VERY-SLOPPY")
        } else {
            ("Fast-lane member sloppy", "ORACLE-FAST-LANE-SLOPPY")
        };
        Finding::new(
            title,
            format!("{name} has not reported for {distance} blocks"),
            alert_id,
            severity,
            FindingType::Suspicious,
        )
        .with_metadata("member", name)
        .with_metadata("distance_blocks", distance.to_string())
        .with_metadata("fast_lane", in_fast_lane.to_string())
        .with_metadata("block_number", block.number.to_string())
    }

    fn balance_finding(
        &self,
        member: &Address,
        balance_wei: u128,
        severity: Severity,
        block: &BlockRef,
    ) -> Finding {
        let name = self.config.member_name(member);
        Finding::new(
            "Oracle member balance low",
            format!("{name} balance is {balance_wei} wei"),
            "ORACLE-MEMBER-LOW-BALANCE",
            severity,
            FindingType::Degraded,
        )
        .with_metadata("member", name)
        .with_metadata("balance_wei", balance_wei.to_string())
        .with_metadata("block_number", block.number.to_string())
    }

    fn overdue_finding(
        &self,
        kind: OverdueKind,
        severity: Severity,
        last_submission_at: u64,
        block: &BlockRef,
    ) -> Finding {
        let gap = block.timestamp.saturating_sub(last_submission_at);
        Finding::new(
            "Oracle report overdue",
            format!(
                "No {} submission for {} seconds (last at {})",
                kind.as_str(),
                gap,
                last_submission_at
            ),
            "ORACLE-REPORT-OVERDUE",
            severity,
            FindingType::Degraded,
        )
        .with_metadata("kind", kind.as_str())
        .with_metadata("gap_secs", gap.to_string())
        .with_metadata("last_submission_at", last_submission_at.to_string())
        .with_metadata("block_number", block.number.to_string())
    }
}
