//! Portal trait abstraction.
//!
//! A portal mounts a subtree into a named container outside its logical
//! parent and hands back a handle that can later destroy it.

use crate::models::{OverlayId, OverlayKind};

use super::surface::SurfaceSlot;

/// What the overlay layer asks the renderer to mount.
#[derive(Debug, Clone)]
pub struct OverlayElement {
    /// Overlay id
    pub id: OverlayId,
    /// Overlay kind
    pub kind: OverlayKind,
    /// Stacking order at mount time
    pub z_index: i32,
    /// Title or label shown by the surface
    pub title: String,
    /// Slot the renderer fills once the surface has painted
    pub slot: SurfaceSlot,
}

/// Handle to a mounted portal subtree.
pub trait PortalHandle: Send {
    /// Unmount the subtree. Called exactly once, at teardown.
    fn destroy(&mut self);
}

/// Rendering mechanism for overlays.
pub trait Portal: Send + Sync {
    /// Mount `element` into `container`.
    fn render(&self, container: &str, element: OverlayElement) -> Box<dyn PortalHandle>;
}
