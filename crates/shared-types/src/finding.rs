//! The `Finding` record — the system boundary toward the alert pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alert id used by every finding that reports a failed chain read.
///
/// The runtime health window counts findings with this id to decide when the
/// process should flip to permanently unhealthy.
pub const NETWORK_ERROR_ALERT_ID: &str = "SENTINEL-NETWORK-ERROR";

/// Finding severity, ordered from least to most urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Human-readable label as the downstream pipeline expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// Coarse finding classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingType {
    /// Expected but noteworthy state (threshold progress, state transition)
    Info,
    /// Possible misbehavior (report disagreement, sloppy member)
    Suspicious,
    /// The monitored system or the monitor itself is impaired
    Degraded,
}

/// A structured, severity-tagged notification record emitted by a monitor.
///
/// Field set is bit-exact with what the hosting alert pipeline consumes;
/// anything monitor-specific goes into `metadata` as stringified values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Short human-readable title
    pub name: String,
    /// Full description, safe to concatenate during merging
    pub description: String,
    /// Stable identifier for the finding class (merge/dedup key)
    pub alert_id: String,
    /// Severity level
    pub severity: Severity,
    /// Classification
    pub finding_type: FindingType,
    /// Stringified raw arguments and audit context (progress, block number)
    pub metadata: BTreeMap<String, String>,
}

impl Finding {
    /// Create a finding with empty metadata.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        alert_id: impl Into<String>,
        severity: Severity,
        finding_type: FindingType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            alert_id: alert_id.into(),
            severity,
            finding_type,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Standard finding for a chain read that failed after all retries.
    ///
    /// `context` names the call and its argument; `cause` is the final
    /// underlying error, stringified.
    pub fn network_error(context: impl Into<String>, cause: impl Into<String>) -> Self {
        let context = context.into();
        Finding::new(
            "Network error",
            format!("Failed to read chain state: {context}"),
            NETWORK_ERROR_ALERT_ID,
            Severity::Medium,
            FindingType::Degraded,
        )
        .with_metadata("context", context)
        .with_metadata("cause", cause)
    }

    /// True if this finding reports a failed chain read.
    pub fn is_network_error(&self) -> bool {
        self.alert_id == NETWORK_ERROR_ALERT_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_network_error_is_tagged() {
        let finding = Finding::network_error("get_balance(0xab…)", "connection refused");
        assert!(finding.is_network_error());
        assert_eq!(finding.severity, Severity::Medium);
        assert_eq!(
            finding.metadata.get("cause").map(String::as_str),
            Some("connection refused")
        );
    }

    #[test]
    fn test_with_metadata_accumulates() {
        let finding = Finding::new(
            "t",
            "d",
            "ID",
            Severity::Info,
            FindingType::Info,
        )
        .with_metadata("a", "1")
        .with_metadata("b", "2");
        assert_eq!(finding.metadata.len(), 2);
    }
}
