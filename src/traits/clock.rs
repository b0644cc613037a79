//! Clock trait abstraction.

use tokio::time::Instant;

/// Monotonic time source.
///
/// Uses `tokio::time::Instant` so that a paused tokio runtime controls it.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}
