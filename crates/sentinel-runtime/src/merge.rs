//! Finding merge layer.
//!
//! A cascading failure can make every monitor fire at once; merging
//! findings that share an alert id bounds what the downstream notification
//! pipeline has to absorb.

use shared_types::Finding;
use std::collections::BTreeMap;

/// Cycle volume above which findings get merged per alert id.
pub const DEFAULT_VOLUME_THRESHOLD: usize = 50;

/// Merge findings sharing an alert id once the cycle volume exceeds
/// `volume_threshold`; below it, findings pass through untouched.
///
/// Merged findings keep the first group member as the base, concatenate
/// descriptions, union metadata (later conflicting values are appended to
/// the existing entry), take the maximum severity, and record the group
/// size under `merged_count`. First-seen order of alert ids is preserved.
pub fn merge_findings(findings: Vec<Finding>, volume_threshold: usize) -> Vec<Finding> {
    if findings.len() <= volume_threshold {
        return findings;
    }

    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, (Finding, usize)> = BTreeMap::new();
    for finding in findings {
        match groups.get_mut(&finding.alert_id) {
            None => {
                order.push(finding.alert_id.clone());
                groups.insert(finding.alert_id.clone(), (finding, 1));
            }
            Some((merged, count)) => {
                *count += 1;
                merged.description.push('\n');
                merged.description.push_str(&finding.description);
                merged.severity = merged.severity.max(finding.severity);
                for (key, value) in finding.metadata {
                    match merged.metadata.get_mut(&key) {
                        None => {
                            merged.metadata.insert(key, value);
                        }
                        Some(existing) if *existing != value => {
                            existing.push_str("; ");
                            existing.push_str(&value);
                        }
                        Some(_) => {}
                    }
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|alert_id| groups.remove(&alert_id))
        .map(|(mut finding, count)| {
            if count > 1 {
                finding = finding.with_metadata("merged_count", count.to_string());
            }
            finding
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{FindingType, Severity};

    fn finding(alert_id: &str, description: &str, severity: Severity) -> Finding {
        Finding::new("t", description, alert_id, severity, FindingType::Info)
    }

    #[test]
    fn test_below_threshold_passes_through() {
        let findings = vec![
            finding("A", "one", Severity::Info),
            finding("A", "two", Severity::Info),
        ];
        let merged = merge_findings(findings.clone(), 50);
        assert_eq!(merged, findings);
    }

    #[test]
    fn test_above_threshold_merges_by_alert_id() {
        let mut findings = Vec::new();
        for i in 0..40 {
            findings.push(finding("A", &format!("a{i}"), Severity::Info));
        }
        for i in 0..20 {
            findings.push(finding("B", &format!("b{i}"), Severity::Medium));
        }
        let merged = merge_findings(findings, 50);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].alert_id, "A");
        assert_eq!(
            merged[0].metadata.get("merged_count").map(String::as_str),
            Some("40")
        );
        assert!(merged[0].description.contains("a0"));
        assert!(merged[0].description.contains("a39"));
    }

    #[test]
    fn test_merged_severity_is_maximum() {
        let mut findings: Vec<Finding> = (0..60)
            .map(|i| finding("A", &format!("d{i}"), Severity::Info))
            .collect();
        findings[30].severity = Severity::Critical;
        let merged = merge_findings(findings, 50);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].severity, Severity::Critical);
    }
}
