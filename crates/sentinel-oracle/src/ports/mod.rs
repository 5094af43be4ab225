//! Ports for the oracle monitor.

pub mod outbound;
