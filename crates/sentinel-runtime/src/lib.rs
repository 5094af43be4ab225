//! # sentinel-runtime
//!
//! Everything above the individual monitors:
//! - **Supervisor**: fans one block notification out to all registered
//!   monitors concurrently, bounds each cycle with a hard timeout, and
//!   retries failing handlers before degrading them to error findings
//! - **Merge layer**: bounds downstream notification volume during
//!   cascading failures by merging findings that share an alert id
//! - **Health signal**: rolling network-error accounting that trips
//!   permanently unhealthy once error volume crosses the ceiling
//! - **Configuration**: typed per-network constant tables, loaded once at
//!   process start
//! - **Logging**: `tracing` subscriber setup

pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod merge;
pub mod monitors;
pub mod supervisor;

pub use config::{LadderStep, MemberName, Network, NetworkConfig};
pub use error::{MonitorError, RuntimeError};
pub use health::{HealthConfig, HealthWindow};
pub use logging::init_logging;
pub use merge::{merge_findings, DEFAULT_VOLUME_THRESHOLD};
pub use monitors::{GovernanceBlockMonitor, OracleBlockMonitor};
pub use supervisor::{BlockMonitor, Supervisor, SupervisorConfig};
