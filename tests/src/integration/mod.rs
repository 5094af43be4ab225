//! Cross-crate integration flows: monitors behind the supervisor.

pub mod governance_flow;
pub mod oracle_flow;
pub mod support;
