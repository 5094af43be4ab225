//! Bounded retry around any chain read.

use crate::error::{ChainError, ChainResult};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy: fixed attempt count, fixed inter-attempt delay.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Maximum attempts before giving up
    pub max_attempts: u32,
    /// Delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(500),
        }
    }
}

/// Wraps raw reads with the retry policy and tags failures with context.
///
/// `call` never panics and never returns the raw per-attempt error: on
/// exhaustion the caller gets `ChainError::Network` carrying the original
/// cause and a human-readable description of which call failed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResilientReader {
    policy: RetryPolicy,
}

impl ResilientReader {
    /// Reader with the default policy (5 attempts, 500ms apart).
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader with a custom policy.
    pub fn with_policy(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Run `op`, retrying per the policy.
    ///
    /// `description` names the RPC call and its argument, e.g.
    /// `"get_rage_quit_support(block 1234)"`; it ends up in the error and in
    /// the network-error finding downstream.
    pub async fn call<T, F, Fut>(&self, description: &str, mut op: F) -> ChainResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ChainResult<T>>,
    {
        let mut last_cause = String::new();
        for attempt in 1..=self.policy.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "[sentinel-chain] attempt {}/{} failed for {}: {}",
                        attempt, self.policy.max_attempts, description, e
                    );
                    last_cause = e.to_string();
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }
        Err(ChainError::Network {
            context: description.to_string(),
            attempts: self.policy.max_attempts,
            cause: last_cause,
        })
    }
}
