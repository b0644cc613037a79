//! Overlay Kit - stacking and lifecycle core for dialogs, toasts, action
//! lists and popovers.
//!
//! The crate decides *when* overlays mount and unmount and *where* they sit
//! in the z-order; drawing them is left to a [`traits::Portal`]
//! implementation supplied by the host.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod config;
pub mod error;
pub mod gate;
pub mod lifecycle;
pub mod manager;
pub mod models;
pub mod overlays;
pub mod prelude;
pub mod registry;
pub mod stacking;
pub mod traits;

pub use config::{OverlayConfig, Platform};
pub use error::{OverlayError, OverlayResult};
pub use manager::OverlayManager;
