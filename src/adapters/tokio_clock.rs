//! Clock backed by tokio's time driver.

use tokio::time::Instant;

use crate::traits::Clock;

/// Production clock.
///
/// Reads `tokio::time::Instant::now()`, so a paused test runtime controls it
/// together with every `tokio::time::sleep` in the teardown scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
