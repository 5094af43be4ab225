//! # Chain Sentinel Test Suite
//!
//! Unified test crate containing cross-crate integration flows:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── governance_flow.rs   # escrow monitor through the supervisor
//!     └── oracle_flow.rs       # consensus monitor through the supervisor
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sentinel-tests
//! ```

#![allow(dead_code)]

pub mod integration;
