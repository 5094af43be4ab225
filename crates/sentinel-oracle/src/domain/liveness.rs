//! Submission-timeliness classification.

use shared_types::Severity;

/// Block-distance thresholds for sloppy reporting.
#[derive(Clone, Copy, Debug)]
pub struct LivenessThresholds {
    /// Fast-lane members are expected to report within this distance
    pub sloppy_blocks: u64,
    /// No member should be silent for this long
    pub very_sloppy_blocks: u64,
}

/// Classify a member's silence.
///
/// Silence beyond `very_sloppy_blocks` is Medium regardless of fast-lane
/// status; a fast-lane member is already worth an Info beyond
/// `sloppy_blocks`.
pub fn classify_distance(
    distance_blocks: u64,
    in_fast_lane: bool,
    thresholds: &LivenessThresholds,
) -> Option<Severity> {
    if distance_blocks > thresholds.very_sloppy_blocks {
        Some(Severity::Medium)
    } else if in_fast_lane && distance_blocks > thresholds.sloppy_blocks {
        Some(Severity::Info)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: LivenessThresholds = LivenessThresholds {
        sloppy_blocks: 50_400,
        very_sloppy_blocks: 100_800,
    };

    #[test]
    fn test_fresh_member_unclassified() {
        assert_eq!(classify_distance(10, true, &THRESHOLDS), None);
        assert_eq!(classify_distance(10, false, &THRESHOLDS), None);
    }

    #[test]
    fn test_sloppy_only_matters_for_fast_lane() {
        assert_eq!(
            classify_distance(50_401, true, &THRESHOLDS),
            Some(Severity::Info)
        );
        assert_eq!(classify_distance(50_401, false, &THRESHOLDS), None);
    }

    #[test]
    fn test_very_sloppy_regardless_of_fast_lane() {
        assert_eq!(
            classify_distance(100_801, false, &THRESHOLDS),
            Some(Severity::Medium)
        );
        assert_eq!(
            classify_distance(100_801, true, &THRESHOLDS),
            Some(Severity::Medium)
        );
    }

    #[test]
    fn test_boundaries_exclusive() {
        assert_eq!(classify_distance(50_400, true, &THRESHOLDS), None);
        assert_eq!(
            classify_distance(100_800, false, &THRESHOLDS),
            None
        );
        assert_eq!(
            classify_distance(100_800, true, &THRESHOLDS),
            Some(Severity::Info)
        );
    }
}
