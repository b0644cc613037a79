//! Z-index stacking for simultaneously open overlays.
//!
//! Every open overlay gets a distinct stacking order above a fixed baseline.
//! The stack shrinks back to the baseline once everything has closed, even
//! when overlays close out of order.

mod id;
mod stack;
mod tracker;

pub use id::OverlayIdAllocator;
pub use stack::{OverlayEntry, ZIndexAllocator, ZIndexStack};
pub use tracker::OverlayZIndex;
