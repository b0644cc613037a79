//! Lifecycle states and timing policy.

use std::fmt;
use std::time::Duration;

use crate::config::{OverlayConfig, ATTACH_RETRY_ATTEMPTS, ATTACH_RETRY_INTERVAL};

/// Where an overlay instance is in its life.
///
/// ```text
/// Mounted ──close()──▶ CloseRequested ──teardown delay──▶ TornDown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Registered, portal mounted, surface live (or about to attach).
    Mounted,
    /// Exit animation running; teardown timer scheduled.
    CloseRequested,
    /// Surface, portal and registry entry released.
    TornDown,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Mounted => "mounted",
            LifecycleState::CloseRequested => "close_requested",
            LifecycleState::TornDown => "torn_down",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing for deferred teardown and the attach retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeardownPolicy {
    /// Exit animation length; teardown runs this long after the first close.
    pub delay: Duration,
    /// Wait between checks for an unattached surface.
    pub retry_interval: Duration,
    /// Retries after the first check before a close is abandoned.
    pub retry_attempts: u32,
}

impl TeardownPolicy {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            delay: config.teardown_delay(),
            retry_interval: config.attach_retry_interval,
            retry_attempts: config.attach_retry_attempts,
        }
    }

    /// Longest a close can wait for an attach before giving up.
    pub fn max_attach_wait(&self) -> Duration {
        self.retry_interval * self.retry_attempts
    }
}

impl Default for TeardownPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(250),
            retry_interval: ATTACH_RETRY_INTERVAL,
            retry_attempts: ATTACH_RETRY_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;

    #[test]
    fn test_policy_from_config() {
        let config = OverlayConfig::default().with_platform(Platform::Android);
        let policy = TeardownPolicy::from_config(&config);
        assert_eq!(policy.delay, Duration::from_millis(300));
        assert_eq!(policy.max_attach_wait(), Duration::from_millis(100));
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(LifecycleState::CloseRequested.to_string(), "close_requested");
    }
}
