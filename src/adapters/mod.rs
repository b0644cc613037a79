//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`TokioClock`] - Clock driven by tokio's time driver
//! - [`LogPortal`] - Portal that traces mounts instead of drawing
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockClock`] - Manually advanced clock
//! - [`mock::MockPortal`] - Recording portal with controllable attach timing
//! - [`mock::MockSurface`] - Recording surface

pub mod log_portal;
pub mod mock;
pub mod tokio_clock;

pub use log_portal::LogPortal;
pub use mock::{MockClock, MockPortal, MockSurface};
pub use tokio_clock::TokioClock;
