//! Ports for the governance monitor.

pub mod outbound;
