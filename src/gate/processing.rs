//! Re-entrancy guard for overlay triggers.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::traits::Clock;

/// Blocks repeated trigger presses for a fixed cooldown.
///
/// Unlike [`super::Debouncer`] nothing is queued: a press inside the
/// cooldown is dropped outright.
pub struct ProcessingGate {
    cooldown: Duration,
    clock: Arc<dyn Clock>,
    entered_at: Mutex<Option<Instant>>,
}

impl ProcessingGate {
    pub fn new(cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cooldown,
            clock,
            entered_at: Mutex::new(None),
        }
    }

    /// Try to start processing. Returns false if still cooling down.
    pub fn try_enter(&self) -> bool {
        let now = self.clock.now();
        let mut entered_at = self.lock();
        if let Some(at) = *entered_at {
            if now.saturating_duration_since(at) < self.cooldown {
                tracing::debug!("trigger ignored: still processing");
                return false;
            }
        }
        *entered_at = Some(now);
        true
    }

    /// Whether a press now would be dropped.
    pub fn is_processing(&self) -> bool {
        let now = self.clock.now();
        self.lock()
            .is_some_and(|at| now.saturating_duration_since(at) < self.cooldown)
    }

    /// Clear the cooldown immediately.
    pub fn reset(&self) {
        *self.lock() = None;
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.entered_at.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ProcessingGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingGate")
            .field("cooldown", &self.cooldown)
            .field("processing", &self.is_processing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockClock;

    #[test]
    fn test_second_press_within_cooldown_is_dropped() {
        let clock = Arc::new(MockClock::new());
        let gate = ProcessingGate::new(Duration::from_millis(350), clock.clone());

        assert!(gate.try_enter());
        assert!(gate.is_processing());

        clock.advance(Duration::from_millis(349));
        assert!(!gate.try_enter());

        clock.advance(Duration::from_millis(1));
        assert!(!gate.is_processing());
        assert!(gate.try_enter());
    }

    #[test]
    fn test_dropped_press_does_not_extend_cooldown() {
        let clock = Arc::new(MockClock::new());
        let gate = ProcessingGate::new(Duration::from_millis(100), clock.clone());

        assert!(gate.try_enter());
        clock.advance(Duration::from_millis(90));
        assert!(!gate.try_enter());
        clock.advance(Duration::from_millis(10));
        assert!(gate.try_enter());
    }

    #[test]
    fn test_reset_clears_cooldown() {
        let clock = Arc::new(MockClock::new());
        let gate = ProcessingGate::new(Duration::from_millis(350), clock);

        assert!(gate.try_enter());
        gate.reset();
        assert!(gate.try_enter());
    }
}
