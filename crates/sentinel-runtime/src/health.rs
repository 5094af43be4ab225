//! Rolling network-error health signal.
//!
//! Fail-closed: once tripped, the signal stays unhealthy for the process
//! lifetime and an operator restart is required. Silence during an outage
//! is worse than a loud restart.

use shared_types::Finding;
use tracing::error;

/// Ceilings for the health signal.
#[derive(Clone, Copy, Debug)]
pub struct HealthConfig {
    /// Network-error findings in a single cycle that trip the signal
    pub cycle_ceiling: usize,
    /// Network-error findings within the trailing window that trip it
    pub window_ceiling: usize,
    /// Trailing window length (seconds)
    pub window_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            cycle_ceiling: 25,
            window_ceiling: 25,
            window_secs: 900,
        }
    }
}

/// Rolling error accounting.
///
/// `error_count` and the window start reset together when the window
/// expires without tripping; `tripped` never resets.
#[derive(Clone, Copy, Debug)]
pub struct HealthWindow {
    config: HealthConfig,
    error_count: usize,
    window_start: u64,
    tripped: bool,
}

impl HealthWindow {
    pub fn new(config: HealthConfig, now: u64) -> Self {
        Self {
            config,
            error_count: 0,
            window_start: now,
            tripped: false,
        }
    }

    /// Account one cycle's findings. Returns the health status after the
    /// observation.
    pub fn observe(&mut self, findings: &[Finding], now: u64) -> bool {
        if self.tripped {
            return false;
        }

        let cycle_errors = findings.iter().filter(|f| f.is_network_error()).count();

        if now.saturating_sub(self.window_start) >= self.config.window_secs {
            self.error_count = 0;
            self.window_start = now;
        }
        self.error_count += cycle_errors;

        if cycle_errors >= self.config.cycle_ceiling
            || self.error_count >= self.config.window_ceiling
        {
            error!(
                "[sentinel-runtime] health tripped: {} errors this cycle, {} in window",
                cycle_errors, self.error_count
            );
            self.tripped = true;
        }
        !self.tripped
    }

    /// Current health status.
    pub fn is_healthy(&self) -> bool {
        !self.tripped
    }
}
