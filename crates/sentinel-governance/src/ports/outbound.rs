//! Driven Ports (outbound dependencies)
//!
//! Read-only escrow contract getters. Adapters over a concrete RPC client
//! implement this; each method covers a single raw call so the resilient
//! reader can retry them independently.

use crate::types::{DualGovernanceConfig, GovernanceState};
use async_trait::async_trait;
use sentinel_chain::ChainResult;

/// Read-only view of the dual-governance escrow contracts.
#[async_trait]
pub trait EscrowGateway: Send + Sync {
    /// Fetch the immutable config snapshot (seal amounts, timings).
    async fn get_config(&self) -> ChainResult<DualGovernanceConfig>;

    /// Detailed governance state at `block`.
    async fn get_governance_state(&self, block: u64) -> ChainResult<GovernanceState>;

    /// Total rage-quit support at `block` (raw token units).
    async fn get_rage_quit_support(&self, block: u64) -> ChainResult<u128>;

    /// Total veto-signalling support at `block` (raw token units).
    async fn get_veto_signalling_support(&self, block: u64) -> ChainResult<u128>;
}
