//! The rendered overlay surface and the slot it attaches to.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::FormValues;

/// A painted overlay surface.
///
/// The renderer implements this and attaches it to the element's
/// [`SurfaceSlot`] after the first paint.
pub trait OverlaySurface: Send + Sync {
    /// Drive the open/closed visual state (starts the exit animation on `false`).
    fn set_open(&self, open: bool);

    /// Current form values, if the surface hosts a form.
    fn form(&self) -> Option<FormValues> {
        None
    }
}

/// Late-bound reference to an [`OverlaySurface`].
///
/// Empty between `show` returning and the first paint, and again after
/// teardown.
#[derive(Clone, Default)]
pub struct SurfaceSlot {
    inner: Arc<Mutex<Option<Arc<dyn OverlaySurface>>>>,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the painted surface.
    pub fn attach(&self, surface: Arc<dyn OverlaySurface>) {
        *self.lock() = Some(surface);
    }

    /// The attached surface, if any.
    pub fn get(&self) -> Option<Arc<dyn OverlaySurface>> {
        self.lock().clone()
    }

    /// Detach and return the surface.
    pub fn take(&self) -> Option<Arc<dyn OverlaySurface>> {
        self.lock().take()
    }

    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Arc<dyn OverlaySurface>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SurfaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceSlot")
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Flag(AtomicBool);

    impl OverlaySurface for Flag {
        fn set_open(&self, open: bool) {
            self.0.store(open, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_slot_attach_take() {
        let slot = SurfaceSlot::new();
        assert!(!slot.is_attached());
        assert!(slot.get().is_none());

        slot.attach(Arc::new(Flag(AtomicBool::new(true))));
        assert!(slot.is_attached());

        let clone = slot.clone();
        assert!(clone.is_attached());

        assert!(clone.take().is_some());
        assert!(!slot.is_attached());
    }

    #[test]
    fn test_default_form_is_none() {
        let flag = Flag(AtomicBool::new(false));
        flag.set_open(true);
        assert!(flag.0.load(Ordering::SeqCst));
        assert!(flag.form().is_none());
    }
}
