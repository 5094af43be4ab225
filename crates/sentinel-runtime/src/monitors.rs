//! `BlockMonitor` adapters for the concrete monitors.
//!
//! The monitors recover every steady-state error into findings themselves,
//! so these adapters never surface `Err`; the supervisor's retry path only
//! exists for faults the monitors cannot catch.

use crate::error::MonitorError;
use crate::supervisor::BlockMonitor;
use async_trait::async_trait;
use sentinel_chain::LogSource;
use sentinel_governance::{EscrowGateway, GovernanceEscrowMonitor};
use sentinel_oracle::{HashConsensusGateway, OracleConsensusMonitor};
use shared_types::{BlockRef, Finding};

/// Governance escrow monitor as a supervised block monitor.
pub struct GovernanceBlockMonitor<G: EscrowGateway> {
    inner: GovernanceEscrowMonitor<G>,
}

impl<G: EscrowGateway> GovernanceBlockMonitor<G> {
    pub fn new(inner: GovernanceEscrowMonitor<G>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: EscrowGateway + 'static> BlockMonitor for GovernanceBlockMonitor<G> {
    fn name(&self) -> &str {
        "governance-escrow"
    }

    async fn handle_block(&self, block: &BlockRef) -> Result<Vec<Finding>, MonitorError> {
        Ok(self.inner.handle_block(block).await)
    }
}

/// Oracle consensus monitor as a supervised block monitor.
///
/// Only the per-block work (balances, overdue detection) runs here; report
/// events go straight to the inner monitor from the feed glue.
pub struct OracleBlockMonitor<G: HashConsensusGateway + LogSource> {
    inner: OracleConsensusMonitor<G>,
}

impl<G: HashConsensusGateway + LogSource> OracleBlockMonitor<G> {
    pub fn new(inner: OracleConsensusMonitor<G>) -> Self {
        Self { inner }
    }

    /// The wrapped monitor, for the event-driven entry points.
    pub fn inner(&self) -> &OracleConsensusMonitor<G> {
        &self.inner
    }
}

#[async_trait]
impl<G: HashConsensusGateway + LogSource + 'static> BlockMonitor for OracleBlockMonitor<G> {
    fn name(&self) -> &str {
        "oracle-consensus"
    }

    async fn handle_block(&self, block: &BlockRef) -> Result<Vec<Finding>, MonitorError> {
        Ok(self.inner.handle_block(block).await)
    }
}
