//! # Shared Types Crate
//!
//! Types shared by every monitor crate: the `Finding` record consumed by the
//! hosting alert pipeline, and the minimal chain primitives (hashes,
//! addresses, block references, decoded log events) the monitors operate on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: anything crossing a crate boundary is
//!   defined here.
//! - **Bit-exact boundary**: `Finding` carries exactly the fields the
//!   downstream pipeline expects; monitors never invent extra top-level
//!   fields, only `metadata` entries.

pub mod chain;
pub mod finding;

pub use chain::{short_hash, short_hex, Address, BlockRef, Hash, LogEvent};
pub use finding::{Finding, FindingType, Severity, NETWORK_ERROR_ALERT_ID};
