//! Monitor supervision: concurrent fan-out, per-cycle timeout, retries.

use crate::error::MonitorError;
use crate::health::{HealthConfig, HealthWindow};
use crate::merge::{merge_findings, DEFAULT_VOLUME_THRESHOLD};
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use shared_types::{BlockRef, Finding, FindingType, Severity};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// A registered monitor: one evaluation per block notification.
///
/// Implementations recover their own steady-state errors into findings; a
/// returned `Err` is the coarse fault-isolation path and gets retried. The
/// supervisor may invoke a handler again after a partial failure, so
/// internal state updates must be idempotent.
#[async_trait]
pub trait BlockMonitor: Send + Sync {
    /// Monitor name for logs and synthetic findings.
    fn name(&self) -> &str;

    /// Evaluate one block.
    async fn handle_block(&self, block: &BlockRef) -> Result<Vec<Finding>, MonitorError>;
}

/// Supervisor limits.
#[derive(Clone, Copy, Debug)]
pub struct SupervisorConfig {
    /// Hard wall-clock bound per monitor per cycle
    pub cycle_timeout: Duration,
    /// Handler attempts before degrading to an error finding
    pub max_handler_attempts: u32,
    /// Merge-layer volume threshold
    pub volume_threshold: usize,
    /// Health signal ceilings
    pub health: HealthConfig,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            cycle_timeout: Duration::from_secs(240),
            max_handler_attempts: 5,
            volume_threshold: DEFAULT_VOLUME_THRESHOLD,
            health: HealthConfig::default(),
        }
    }
}

/// Fans each block out to all registered monitors concurrently; a slow or
/// failing monitor degrades to a synthetic finding instead of blocking or
/// crashing its siblings.
pub struct Supervisor {
    monitors: Vec<Arc<dyn BlockMonitor>>,
    config: SupervisorConfig,
    health: Mutex<HealthWindow>,
}

impl Supervisor {
    /// Empty supervisor; `now` seeds the health window.
    pub fn new(config: SupervisorConfig, now: u64) -> Self {
        Self {
            monitors: Vec::new(),
            config,
            health: Mutex::new(HealthWindow::new(config.health, now)),
        }
    }

    /// Register a monitor. Registration happens once at composition time,
    /// before the first cycle.
    pub fn register(&mut self, monitor: Arc<dyn BlockMonitor>) {
        self.monitors.push(monitor);
    }

    /// Run one evaluation cycle for `block` across all monitors.
    pub async fn run_cycle(&self, block: &BlockRef) -> Vec<Finding> {
        let cycle_id = Uuid::new_v4();
        debug!(
            "[sentinel-runtime] cycle {} for block {} across {} monitors",
            cycle_id,
            block.number,
            self.monitors.len()
        );

        let cycles = self.monitors.iter().map(|monitor| {
            let monitor = monitor.clone();
            async move {
                match tokio::time::timeout(
                    self.config.cycle_timeout,
                    self.run_with_retries(monitor.as_ref(), block),
                )
                .await
                {
                    Ok(findings) => findings,
                    Err(_) => {
                        warn!(
                            "[sentinel-runtime] monitor '{}' timed out at block {}",
                            monitor.name(),
                            block.number
                        );
                        vec![timeout_finding(
                            monitor.name(),
                            self.config.cycle_timeout,
                            block,
                        )]
                    }
                }
            }
        });
        let findings: Vec<Finding> = join_all(cycles).await.into_iter().flatten().collect();

        // Health accounting sees the raw volume; merging is only a courtesy
        // to the downstream notification pipeline.
        self.health.lock().observe(&findings, block.timestamp);
        merge_findings(findings, self.config.volume_threshold)
    }

    /// Health status: flips to false permanently once error volume crosses
    /// the configured ceiling.
    pub fn is_healthy(&self) -> bool {
        self.health.lock().is_healthy()
    }

    async fn run_with_retries(&self, monitor: &dyn BlockMonitor, block: &BlockRef) -> Vec<Finding> {
        let mut last_error = String::new();
        for attempt in 1..=self.config.max_handler_attempts {
            match monitor.handle_block(block).await {
                Ok(findings) => return findings,
                Err(e) => {
                    warn!(
                        "[sentinel-runtime] monitor '{}' attempt {}/{} failed: {}",
                        monitor.name(),
                        attempt,
                        self.config.max_handler_attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }
        }
        vec![error_finding(monitor.name(), &last_error, block)]
    }
}

fn timeout_finding(monitor: &str, timeout: Duration, block: &BlockRef) -> Finding {
    Finding::new(
        "Monitor timed out",
        format!(
            "Monitor '{monitor}' exceeded the {}s cycle budget",
            timeout.as_secs()
        ),
        "SENTINEL-MONITOR-TIMEOUT",
        Severity::High,
        FindingType::Degraded,
    )
    .with_metadata("monitor", monitor)
    .with_metadata("block_number", block.number.to_string())
}

fn error_finding(monitor: &str, cause: &str, block: &BlockRef) -> Finding {
    Finding::new(
        "Monitor failed",
        format!("Monitor '{monitor}' failed after all retries: {cause}"),
        "SENTINEL-MONITOR-ERROR",
        Severity::High,
        FindingType::Degraded,
    )
    .with_metadata("monitor", monitor)
    .with_metadata("cause", cause)
    .with_metadata("block_number", block.number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StaticMonitor {
        name: &'static str,
        findings: Vec<Finding>,
    }

    #[async_trait]
    impl BlockMonitor for StaticMonitor {
        fn name(&self) -> &str {
            self.name
        }

        async fn handle_block(&self, _block: &BlockRef) -> Result<Vec<Finding>, MonitorError> {
            Ok(self.findings.clone())
        }
    }

    struct FlakyMonitor {
        calls: AtomicU32,
        succeed_on: u32,
    }

    #[async_trait]
    impl BlockMonitor for FlakyMonitor {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn handle_block(&self, _block: &BlockRef) -> Result<Vec<Finding>, MonitorError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok(Vec::new())
            } else {
                Err(MonitorError::Failed {
                    monitor: "flaky".into(),
                    reason: "boom".into(),
                })
            }
        }
    }

    struct SleepyMonitor;

    #[async_trait]
    impl BlockMonitor for SleepyMonitor {
        fn name(&self) -> &str {
            "sleepy"
        }

        async fn handle_block(&self, _block: &BlockRef) -> Result<Vec<Finding>, MonitorError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok(Vec::new())
        }
    }

    fn info_finding(alert_id: &str) -> Finding {
        Finding::new("t", "d", alert_id, Severity::Info, FindingType::Info)
    }

    #[tokio::test]
    async fn test_findings_pass_through() {
        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 0);
        supervisor.register(Arc::new(StaticMonitor {
            name: "a",
            findings: vec![info_finding("A")],
        }));
        supervisor.register(Arc::new(StaticMonitor {
            name: "b",
            findings: vec![info_finding("B")],
        }));

        let findings = supervisor.run_cycle(&BlockRef::at(1, 0)).await;
        assert_eq!(findings.len(), 2);
        assert!(supervisor.is_healthy());
    }

    #[tokio::test]
    async fn test_failing_monitor_degrades_without_crashing_sibling() {
        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 0);
        let flaky = Arc::new(FlakyMonitor {
            calls: AtomicU32::new(0),
            succeed_on: u32::MAX,
        });
        supervisor.register(flaky.clone());
        supervisor.register(Arc::new(StaticMonitor {
            name: "healthy",
            findings: vec![info_finding("OK")],
        }));

        let findings = supervisor.run_cycle(&BlockRef::at(1, 0)).await;
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 5);
        assert!(findings.iter().any(|f| f.alert_id == "SENTINEL-MONITOR-ERROR"));
        assert!(findings.iter().any(|f| f.alert_id == "OK"));
    }

    #[tokio::test]
    async fn test_transient_failure_retried_to_success() {
        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 0);
        let flaky = Arc::new(FlakyMonitor {
            calls: AtomicU32::new(0),
            succeed_on: 3,
        });
        supervisor.register(flaky.clone());

        let findings = supervisor.run_cycle(&BlockRef::at(1, 0)).await;
        assert!(findings.is_empty());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_yields_synthetic_finding() {
        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 0);
        supervisor.register(Arc::new(SleepyMonitor));
        supervisor.register(Arc::new(StaticMonitor {
            name: "fast",
            findings: vec![info_finding("FAST")],
        }));

        let findings = supervisor.run_cycle(&BlockRef::at(1, 0)).await;
        assert!(findings
            .iter()
            .any(|f| f.alert_id == "SENTINEL-MONITOR-TIMEOUT"));
        assert!(findings.iter().any(|f| f.alert_id == "FAST"));
    }

    #[tokio::test]
    async fn test_error_storm_trips_health() {
        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 0);
        let storm: Vec<Finding> = (0..30)
            .map(|i| Finding::network_error(format!("call {i}"), "down"))
            .collect();
        supervisor.register(Arc::new(StaticMonitor {
            name: "storm",
            findings: storm,
        }));

        supervisor.run_cycle(&BlockRef::at(1, 0)).await;
        assert!(!supervisor.is_healthy());
    }
}
