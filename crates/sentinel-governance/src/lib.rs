//! # sentinel-governance
//!
//! Governance Escrow Threshold Monitor.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Threshold Hysteresis Policy**: pure ladder-walking logic that emits
//!   exactly one alert per threshold level crossed, never re-alerting while
//!   the metric fluctuates around an already-reported level
//! - **Governance Escrow Monitor**: the dual-governance state machine and
//!   two escrow support ratios, evaluated once per block
//!
//! ## State machine
//!
//! ```text
//! Normal ──→ VetoSignalling ──→ VetoSignallingDeactivation ──→ VetoCooldown ──→ Normal
//!                 │
//!                 └──────────────→ RageQuit ──→ VetoCooldown
//! ```
//!
//! The tracked alert level for each ladder resets exactly when the on-chain
//! state leaves the states that ladder is scoped to, so a support ratio that
//! retreats and climbs again after a state round-trip re-alerts from scratch.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod types;

pub use domain::hysteresis::{
    evaluate, evaluate_ratio, AlertLevel, HysteresisOutcome, ThresholdLadder, ThresholdStep,
};
pub use error::{GovernanceError, GovernanceResult};
pub use ports::outbound::EscrowGateway;
pub use service::GovernanceEscrowMonitor;
pub use types::{
    default_rage_quit_ladder, default_veto_signalling_ladder, DualGovernanceConfig,
    GovernanceState,
};
