//! # sentinel-oracle
//!
//! Oracle Report Consensus Monitor.
//!
//! ## Overview
//!
//! Observes (never participates in) an oracle committee's hash-consensus
//! process and reports on:
//! - **Disagreement**: a member submitting an alternative report hash for
//!   the reference slot other members already reported on
//! - **Staleness**: members that have not reported for about a week
//!   (fast-lane members) or two weeks (anyone)
//! - **Funding**: member ETH balances dropping below operational thresholds
//! - **Overdue submissions**: the aggregated report not landing on-chain
//!   within the expected cadence, with escalating severity
//!
//! Per-member state is backfilled from historical logs at startup via the
//! chunked fetcher and then maintained incrementally from the feed.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod types;

pub use domain::balances::{classify_balance, BalanceCooldowns};
pub use domain::liveness::{classify_distance, LivenessThresholds};
pub use domain::overdue::{OverdueKind, OverdueTracker};
pub use domain::reports::{Disagreement, ReportLedger};
pub use error::{OracleError, OracleResult};
pub use ports::outbound::HashConsensusGateway;
pub use service::OracleConsensusMonitor;
pub use types::{MemberReport, OracleMonitorConfig, ReportReceivedEvent, SubmissionTimes};
