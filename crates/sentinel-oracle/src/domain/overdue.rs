//! Overdue-submission tracking with escalation.
//!
//! The aggregated oracle report is expected on-chain on a fixed cadence.
//! When the gap since the last submission exceeds the configured maximum,
//! the tracker fires at most once per trigger period; every Nth finding is
//! escalated to Critical so a persistently stuck oracle eventually pages
//! loudly without producing an alert storm in between.

use shared_types::Severity;

/// Which submission is overdue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverdueKind {
    MainData,
    ExtraData,
}

impl OverdueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverdueKind::MainData => "main data",
            OverdueKind::ExtraData => "extra data",
        }
    }
}

/// Tracks last-submission timestamps and the overdue alert cadence.
#[derive(Clone, Copy, Debug)]
pub struct OverdueTracker {
    last_main_data_at: u64,
    last_extra_data_at: u64,
    last_alert_at: u64,
    alerts_fired: u32,
}

impl OverdueTracker {
    /// Start tracking from `now`; both submissions count as fresh until
    /// real timestamps are seeded.
    pub fn new(now: u64) -> Self {
        Self {
            last_main_data_at: now,
            last_extra_data_at: now,
            last_alert_at: 0,
            alerts_fired: 0,
        }
    }

    /// Seed or refresh the last-submission timestamps from chain state.
    /// Timestamps only move forward; a stale re-read never regresses them.
    pub fn note_submissions(&mut self, main_data_at: u64, extra_data_at: u64) {
        self.last_main_data_at = self.last_main_data_at.max(main_data_at);
        self.last_extra_data_at = self.last_extra_data_at.max(extra_data_at);
    }

    /// Record an observed main-data submission.
    pub fn note_main_data(&mut self, at: u64) {
        self.last_main_data_at = self.last_main_data_at.max(at);
    }

    /// Record an observed extra-data submission.
    pub fn note_extra_data(&mut self, at: u64) {
        self.last_extra_data_at = self.last_extra_data_at.max(at);
    }

    /// Last known main-data submission timestamp.
    pub fn last_main_data_at(&self) -> u64 {
        self.last_main_data_at
    }

    /// Check whether an overdue finding is due at `now`.
    ///
    /// Returns the overdue submission kind (main data takes precedence when
    /// both lag) once per trigger period.
    pub fn check(
        &self,
        now: u64,
        max_main_gap_secs: u64,
        max_extra_gap_secs: u64,
        trigger_period_secs: u64,
    ) -> Option<OverdueKind> {
        if now.saturating_sub(self.last_alert_at) < trigger_period_secs {
            return None;
        }
        if now.saturating_sub(self.last_main_data_at) > max_main_gap_secs {
            Some(OverdueKind::MainData)
        } else if now.saturating_sub(self.last_extra_data_at) > max_extra_gap_secs {
            Some(OverdueKind::ExtraData)
        } else {
            None
        }
    }

    /// Record that an overdue finding fired at `now`, returning the severity
    /// to use: every `critical_every`-th finding escalates to Critical.
    pub fn record_alert(&mut self, now: u64, critical_every: u32) -> Severity {
        self.last_alert_at = now;
        self.alerts_fired += 1;
        if critical_every > 0 && self.alerts_fired % critical_every == 0 {
            Severity::Critical
        } else {
            Severity::High
        }
    }
}
