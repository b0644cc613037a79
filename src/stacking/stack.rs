//! Z-index stack allocation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::OverlayId;

/// One open overlay on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayEntry {
    pub id: OverlayId,
    /// Stacking order of this overlay
    pub z_index: i32,
    /// Stacking levels owned by this entry, starting at its z-index.
    /// Grows when an overlay above it closes out of order.
    pub levels: i32,
}

impl OverlayEntry {
    /// First z-index above everything this entry owns.
    fn next_z_index(&self) -> i32 {
        self.z_index.saturating_add(self.levels)
    }
}

/// Stack of open overlays, bottom first.
///
/// Z-indices are strictly increasing in open order. Releasing the topmost
/// entry simply pops it. Releasing an entry from the middle hands its levels
/// to the entry directly below, so overlays still open above keep their
/// values and no gap opens underneath them; those levels are reclaimed when
/// the entry below is popped in turn.
#[derive(Debug, Clone)]
pub struct ZIndexStack {
    baseline: i32,
    entries: Vec<OverlayEntry>,
}

impl ZIndexStack {
    pub fn new(baseline: i32) -> Self {
        Self {
            baseline,
            entries: Vec::new(),
        }
    }

    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    /// Push `id` on top of the stack. No-op if already allocated or `id` is none.
    pub fn allocate(&mut self, id: OverlayId) -> i32 {
        if !id.is_some() {
            return self.baseline;
        }
        if let Some(entry) = self.find(id) {
            return entry.z_index;
        }

        let z_index = self
            .entries
            .last()
            .map_or(self.baseline, OverlayEntry::next_z_index);
        self.entries.push(OverlayEntry {
            id,
            z_index,
            levels: 1,
        });
        tracing::trace!("z-index {} allocated to overlay {}", z_index, id);
        z_index
    }

    /// Remove `id` from the stack. Returns false if it was not allocated.
    pub fn release(&mut self, id: OverlayId) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };

        if index + 1 == self.entries.len() {
            self.entries.pop();
            tracing::trace!("overlay {} released from top of stack", id);
        } else {
            let removed = self.entries.remove(index);
            if let Some(below) = index.checked_sub(1).and_then(|i| self.entries.get_mut(i)) {
                below.levels = below.levels.saturating_add(removed.levels);
            }
            tracing::trace!(
                "overlay {} released out of order at depth {}",
                id,
                self.entries.len() - index
            );
        }
        true
    }

    /// Current z-index of `id`, or the baseline if unknown.
    pub fn z_index_for(&self, id: OverlayId) -> i32 {
        self.find(id).map_or(self.baseline, |e| e.z_index)
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.find(id).is_some()
    }

    /// Topmost open entry.
    pub fn top(&self) -> Option<&OverlayEntry> {
        self.entries.last()
    }

    /// All open entries, bottom first.
    pub fn entries(&self) -> &[OverlayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, id: OverlayId) -> Option<&OverlayEntry> {
        if !id.is_some() {
            return None;
        }
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Shared handle to one [`ZIndexStack`].
#[derive(Debug, Clone)]
pub struct ZIndexAllocator {
    stack: Arc<Mutex<ZIndexStack>>,
}

impl ZIndexAllocator {
    pub fn new(baseline: i32) -> Self {
        Self {
            stack: Arc::new(Mutex::new(ZIndexStack::new(baseline))),
        }
    }

    pub fn allocate(&self, id: OverlayId) -> i32 {
        self.lock().allocate(id)
    }

    pub fn release(&self, id: OverlayId) -> bool {
        self.lock().release(id)
    }

    pub fn z_index_for(&self, id: OverlayId) -> i32 {
        self.lock().z_index_for(id)
    }

    pub fn baseline(&self) -> i32 {
        self.lock().baseline()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current stack, for inspection.
    pub fn snapshot(&self) -> Vec<OverlayEntry> {
        self.lock().entries().to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, ZIndexStack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
