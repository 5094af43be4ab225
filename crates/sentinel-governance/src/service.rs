//! Governance Escrow Threshold Monitor.

use crate::domain::hysteresis::{evaluate_ratio, AlertLevel, ThresholdLadder, ThresholdStep};
use crate::error::GovernanceResult;
use crate::ports::outbound::EscrowGateway;
use crate::types::{
    default_rage_quit_ladder, default_veto_signalling_ladder, DualGovernanceConfig,
    GovernanceState,
};
use parking_lot::RwLock;
use sentinel_chain::ResilientReader;
use shared_types::{BlockRef, Finding, FindingType, Severity};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mutable monitor state behind the per-instance lock.
struct EscrowMonitorState {
    /// Last governance state read from chain; `None` until the first
    /// successful read (the first read never counts as a transition)
    persisted: Option<GovernanceState>,
    /// Tracked level for the veto-signalling ladder
    veto_level: AlertLevel,
    /// Tracked level for the rage-quit ladder
    rage_quit_level: AlertLevel,
}

/// Monitors the dual-governance escrow: a discrete state machine gating two
/// continuously-growing support ratios, each evaluated against its own
/// threshold ladder with hysteresis.
pub struct GovernanceEscrowMonitor<G: EscrowGateway> {
    gateway: Arc<G>,
    reader: ResilientReader,
    config: DualGovernanceConfig,
    veto_ladder: ThresholdLadder,
    rage_quit_ladder: ThresholdLadder,
    state: RwLock<EscrowMonitorState>,
}

impl<G: EscrowGateway> GovernanceEscrowMonitor<G> {
    /// Fetch the escrow config snapshot and build the monitor with the
    /// default ladders. Config failures here are fatal: nothing downstream
    /// is computable without the seal amounts.
    pub async fn initialize(gateway: Arc<G>, reader: ResilientReader) -> GovernanceResult<Self> {
        Self::initialize_with_ladders(
            gateway,
            reader,
            default_veto_signalling_ladder(),
            default_rage_quit_ladder(),
        )
        .await
    }

    /// As `initialize`, with caller-supplied ladders.
    pub async fn initialize_with_ladders(
        gateway: Arc<G>,
        reader: ResilientReader,
        veto_ladder: ThresholdLadder,
        rage_quit_ladder: ThresholdLadder,
    ) -> GovernanceResult<Self> {
        let config = reader
            .call("get_config()", || gateway.get_config())
            .await?;
        info!(
            "[sentinel-governance] initialized: first_seal={} second_seal={}",
            config.first_seal_support, config.second_seal_support
        );
        Ok(Self {
            gateway,
            reader,
            config,
            veto_ladder,
            rage_quit_ladder,
            state: RwLock::new(EscrowMonitorState {
                persisted: None,
                veto_level: AlertLevel::default(),
                rage_quit_level: AlertLevel::default(),
            }),
        })
    }

    /// Evaluate one block. Network failures produce a single network-error
    /// finding and no threshold findings for this block; partial state is
    /// never alerted on.
    pub async fn handle_block(&self, block: &BlockRef) -> Vec<Finding> {
        if self.config.second_seal_support == 0 {
            // Nothing computable without a seal denominator.
            debug!("[sentinel-governance] second seal support is zero, skipping block");
            return Vec::new();
        }

        let n = block.number;
        let rage_quit_label = format!("get_rage_quit_support(block {n})");
        let veto_support_label = format!("get_veto_signalling_support(block {n})");
        let state_label = format!("get_governance_state(block {n})");
        let (rage_quit, veto_support, fetched) = tokio::join!(
            self.reader.call(
                &rage_quit_label,
                || self.gateway.get_rage_quit_support(n),
            ),
            self.reader.call(
                &veto_support_label,
                || self.gateway.get_veto_signalling_support(n),
            ),
            self.reader.call(
                &state_label,
                || self.gateway.get_governance_state(n),
            ),
        );

        let (rage_quit, veto_support, fetched) = match (rage_quit, veto_support, fetched) {
            (Ok(r), Ok(v), Ok(s)) => (r, v, s),
            (r, v, s) => {
                let cause = [
                    r.err().map(|e| e.to_string()),
                    v.err().map(|e| e.to_string()),
                    s.err().map(|e| e.to_string()),
                ]
                .into_iter()
                .flatten()
                .next()
                .unwrap_or_default();
                warn!(
                    "[sentinel-governance] chain read failed at block {}: {}",
                    n, cause
                );
                return vec![Finding::network_error(
                    format!("governance escrow reads at block {n}"),
                    cause,
                )];
            }
        };

        let mut findings = Vec::new();
        let mut state = self.state.write();

        if let Some(previous) = state.persisted {
            if previous != fetched {
                info!(
                    "[sentinel-governance] state transition {} -> {} at block {}",
                    previous.as_str(),
                    fetched.as_str(),
                    n
                );
                if !matches!(
                    fetched,
                    GovernanceState::Normal | GovernanceState::VetoSignalling
                ) {
                    state.veto_level.reset();
                }
                if fetched != GovernanceState::RageQuit {
                    state.rage_quit_level.reset();
                }
                findings.push(state_transition_finding(previous, fetched, block));
            }
        }
        state.persisted = Some(fetched);

        if fetched == GovernanceState::Normal && self.config.first_seal_support > 0 {
            let outcome = evaluate_ratio(
                &self.veto_ladder,
                veto_support as f64,
                self.config.first_seal_support as f64,
                state.veto_level.get(),
            );
            if let Some(step) = outcome.triggered {
                findings.push(threshold_finding(
                    "Veto signalling support",
                    "GOVERNANCE-VETO-SIGNALLING-SUPPORT",
                    step,
                    veto_support,
                    self.config.first_seal_support,
                    fetched,
                    block,
                ));
            }
            state.veto_level.apply(&outcome);
        }

        if fetched.rage_quit_eligible() {
            let outcome = evaluate_ratio(
                &self.rage_quit_ladder,
                rage_quit as f64,
                self.config.second_seal_support as f64,
                state.rage_quit_level.get(),
            );
            if let Some(step) = outcome.triggered {
                findings.push(threshold_finding(
                    "Rage quit support",
                    "GOVERNANCE-RAGE-QUIT-SUPPORT",
                    step,
                    rage_quit,
                    self.config.second_seal_support,
                    fetched,
                    block,
                ));
            }
            state.rage_quit_level.apply(&outcome);
        }

        findings
    }

    /// Escrow config the monitor was initialized with.
    pub fn config(&self) -> &DualGovernanceConfig {
        &self.config
    }
}

fn state_transition_finding(
    previous: GovernanceState,
    next: GovernanceState,
    block: &BlockRef,
) -> Finding {
    Finding::new(
        "Governance state changed",
        format!(
            "Dual governance transitioned from {} to {}",
            previous.as_str(),
            next.as_str()
        ),
        "GOVERNANCE-STATE-CHANGED",
        Severity::Info,
        FindingType::Info,
    )
    .with_metadata("previous_state", previous.as_str())
    .with_metadata("new_state", next.as_str())
    .with_metadata("block_number", block.number.to_string())
}

fn threshold_finding(
    metric: &str,
    alert_id: &str,
    step: &ThresholdStep,
    support: u128,
    seal: u128,
    state: GovernanceState,
    block: &BlockRef,
) -> Finding {
    let percent = support as f64 / seal as f64 * 100.0;
    let required = seal.saturating_sub(support);
    Finding::new(
        format!("{metric} above {}%", step.level_percent),
        format!(
            "{metric} is at {percent:.2}% of the seal amount; {required} more is needed to reach 100%"
        ),
        alert_id,
        step.severity,
        FindingType::Suspicious,
    )
    .with_metadata("progress_percent", format!("{percent:.2}"))
    .with_metadata("threshold_percent", step.level_percent.to_string())
    .with_metadata("required_to_full_seal", required.to_string())
    .with_metadata("governance_state", state.as_str())
    .with_metadata("block_number", block.number.to_string())
}
