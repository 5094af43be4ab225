//! Threshold-crossing hysteresis.
//!
//! A slowly-climbing metric crossing a ladder of thresholds must produce
//! exactly one alert per level, not an alert storm: the policy remembers the
//! highest level already alerted on and only fires when a strictly higher
//! level is met. The tracked level never regresses on a temporary retreat;
//! it is reset externally when the governing state machine leaves the state
//! the policy instance is scoped to.

use shared_types::Severity;

/// One rung of a threshold ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdStep {
    /// Threshold in percent of the seal amount
    pub level_percent: f64,
    /// Severity of the finding emitted when this level is first met
    pub severity: Severity,
}

impl ThresholdStep {
    pub fn new(level_percent: f64, severity: Severity) -> Self {
        Self {
            level_percent,
            severity,
        }
    }
}

/// Static ladder of threshold steps, held sorted descending by level.
///
/// Levels are unique; the ladder is configuration, never mutated after
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdLadder {
    steps: Vec<ThresholdStep>,
}

impl ThresholdLadder {
    /// Build a ladder, sorting steps descending by level.
    pub fn new(mut steps: Vec<ThresholdStep>) -> Self {
        steps.sort_by(|a, b| b.level_percent.total_cmp(&a.level_percent));
        debug_assert!(
            steps.windows(2).all(|w| w[0].level_percent > w[1].level_percent),
            "ladder levels must be unique"
        );
        Self { steps }
    }

    /// Steps in descending level order.
    pub fn steps(&self) -> &[ThresholdStep] {
        &self.steps
    }

    /// Highest step whose level `percent` meets or exceeds.
    pub fn highest_met(&self, percent: f64) -> Option<&ThresholdStep> {
        self.steps.iter().find(|s| percent >= s.level_percent)
    }
}

/// Per-policy-instance tracked level.
///
/// Monotonically non-decreasing while the governing external state is
/// unchanged; reset exactly on the scoped state transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlertLevel(f64);

impl AlertLevel {
    /// Last-alerted level in percent (0 = nothing alerted yet).
    pub fn get(&self) -> f64 {
        self.0
    }

    /// Apply an evaluation outcome.
    pub fn apply(&mut self, outcome: &HysteresisOutcome<'_>) {
        self.0 = outcome.new_level;
    }

    /// Reset to "nothing alerted yet".
    pub fn reset(&mut self) {
        self.0 = 0.0;
    }
}

/// Result of one hysteresis evaluation.
#[derive(Clone, Copy, Debug)]
pub struct HysteresisOutcome<'a> {
    /// Step to alert on, if a strictly higher level was met
    pub triggered: Option<&'a ThresholdStep>,
    /// Level the policy instance should track from now on
    pub new_level: f64,
}

/// Evaluate the ladder against the current metric value.
///
/// Walks the ladder from highest level to lowest; the first step whose
/// threshold `current_percent` meets or exceeds is the highest met level.
/// An alert fires iff that level is strictly greater than
/// `last_alerted_level`; the returned level never regresses below the last
/// alerted one.
pub fn evaluate<'a>(
    ladder: &'a ThresholdLadder,
    current_percent: f64,
    last_alerted_level: f64,
) -> HysteresisOutcome<'a> {
    match ladder.highest_met(current_percent) {
        Some(step) if step.level_percent > last_alerted_level => HysteresisOutcome {
            triggered: Some(step),
            new_level: step.level_percent,
        },
        Some(step) => HysteresisOutcome {
            triggered: None,
            new_level: last_alerted_level.max(step.level_percent),
        },
        None => HysteresisOutcome {
            triggered: None,
            new_level: last_alerted_level,
        },
    }
}

/// Evaluate against a ratio, guarding the undefined-percentage case.
///
/// When `denominator` is non-positive the percentage is undefined and the
/// policy is inert: no alert, tracked level drops to 0.
pub fn evaluate_ratio<'a>(
    ladder: &'a ThresholdLadder,
    numerator: f64,
    denominator: f64,
    last_alerted_level: f64,
) -> HysteresisOutcome<'a> {
    if denominator <= 0.0 {
        return HysteresisOutcome {
            triggered: None,
            new_level: 0.0,
        };
    }
    evaluate(ladder, numerator / denominator * 100.0, last_alerted_level)
}
