//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockClock`] - Manually advanced clock
//! - [`MockPortal`] - Records renders/destroys and controls when surfaces attach
//! - [`MockSurface`] - Records open/close transitions

pub mod clock;
pub mod portal;
pub mod surface;

pub use clock::MockClock;
pub use portal::{AttachMode, MockPortal};
pub use surface::MockSurface;
