//! Per-overlay z-index tracking.

use crate::models::OverlayId;

use super::stack::ZIndexAllocator;

/// Tracks one overlay's slot on the z-index stack.
///
/// Created once per overlay with a stable id. The z-index is recomputed only
/// when the open flag actually changes, and the slot is released on drop
/// whether or not the overlay is still open.
#[derive(Debug)]
pub struct OverlayZIndex {
    id: OverlayId,
    allocator: ZIndexAllocator,
    open: bool,
    z_index: i32,
}

impl OverlayZIndex {
    pub fn new(id: OverlayId, allocator: ZIndexAllocator) -> Self {
        let z_index = allocator.baseline();
        Self {
            id,
            allocator,
            open: false,
            z_index,
        }
    }

    /// Update the open flag. Returns the current z-index.
    pub fn set_open(&mut self, open: bool) -> i32 {
        if open == self.open {
            return self.z_index;
        }
        self.open = open;
        if open {
            self.z_index = self.allocator.allocate(self.id);
        } else {
            self.allocator.release(self.id);
        }
        self.z_index
    }

    /// Z-index computed at the last open transition.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }
}

impl Drop for OverlayZIndex {
    fn drop(&mut self) {
        self.allocator.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_only_on_transition() {
        let allocator = ZIndexAllocator::new(10);
        let mut a = OverlayZIndex::new(OverlayId(1), allocator.clone());
        let mut b = OverlayZIndex::new(OverlayId(2), allocator.clone());

        assert_eq!(a.z_index(), 10);
        assert_eq!(a.set_open(true), 10);
        assert_eq!(a.set_open(true), 10);
        assert_eq!(b.set_open(true), 11);
        assert_eq!(allocator.len(), 2);
    }

    #[test]
    fn test_close_releases_slot() {
        let allocator = ZIndexAllocator::new(10);
        let mut a = OverlayZIndex::new(OverlayId(1), allocator.clone());
        a.set_open(true);
        a.set_open(false);
        assert!(!a.is_open());
        assert!(allocator.is_empty());
        // closing again is a no-op
        a.set_open(false);
        assert!(allocator.is_empty());
    }

    #[test]
    fn test_drop_releases_even_when_open() {
        let allocator = ZIndexAllocator::new(10);
        {
            let mut a = OverlayZIndex::new(OverlayId(1), allocator.clone());
            a.set_open(true);
            assert_eq!(allocator.len(), 1);
        }
        assert!(allocator.is_empty());
    }
}
