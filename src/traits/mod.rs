//! Trait abstractions for dependency injection and testability.
//!
//! The overlay layer never renders anything itself and never reads the
//! wall clock directly. Both are injected so lifecycle timing can be
//! driven deterministically in tests.
//!
//! # Traits
//!
//! - [`Clock`] - Monotonic time source
//! - [`Portal`] / [`PortalHandle`] - Mount and destroy a rendered subtree
//! - [`OverlaySurface`] - The rendered overlay once it has attached
//! - [`OverlayHandle`] - The `close(extra)` contract returned by every `show`
//! - [`BackHandler`] - Hardware/OS back-button interception

pub mod back_handler;
pub mod clock;
pub mod handle;
pub mod portal;
pub mod surface;

pub use back_handler::BackHandler;
pub use clock::Clock;
pub use handle::OverlayHandle;
pub use portal::{OverlayElement, Portal, PortalHandle};
pub use surface::{OverlaySurface, SurfaceSlot};
