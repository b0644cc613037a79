//! Overlay id allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::OverlayId;

/// Hands out overlay ids from a counter starting at 1.
#[derive(Debug)]
pub struct OverlayIdAllocator {
    next: AtomicU64,
}

impl OverlayIdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> OverlayId {
        OverlayId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OverlayIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
