//! Recording portal for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::OverlayId;
use crate::traits::{OverlayElement, Portal, PortalHandle};

use super::surface::MockSurface;

/// When the mock renderer attaches a surface to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachMode {
    /// Attach during `render` (first paint already done).
    Immediate,
    /// Wait for an explicit [`MockPortal::attach`] call.
    Manual,
}

#[derive(Debug, Default)]
struct PortalState {
    rendered: Vec<(String, OverlayElement)>,
    destroyed: Vec<OverlayId>,
    surfaces: HashMap<OverlayId, Arc<MockSurface>>,
}

/// Portal that records renders and destroys instead of drawing.
///
/// # Example
///
/// ```ignore
/// let portal = Arc::new(MockPortal::new());
/// let manager = OverlayManager::new(config, portal.clone(), clock);
/// let dialog = manager.show_dialog(DialogConfig::new("Confirm"));
/// assert_eq!(portal.rendered_ids(), vec![dialog.id()]);
/// ```
#[derive(Debug, Clone)]
pub struct MockPortal {
    mode: Arc<Mutex<AttachMode>>,
    state: Arc<Mutex<PortalState>>,
}

impl MockPortal {
    /// Portal that attaches surfaces immediately.
    pub fn new() -> Self {
        Self::with_mode(AttachMode::Immediate)
    }

    pub fn with_mode(mode: AttachMode) -> Self {
        Self {
            mode: Arc::new(Mutex::new(mode)),
            state: Arc::new(Mutex::new(PortalState::default())),
        }
    }

    pub fn set_mode(&self, mode: AttachMode) {
        *self.mode.lock().unwrap() = mode;
    }

    /// Attach a fresh surface to a rendered element. Returns it, or None
    /// if the id was never rendered.
    pub fn attach(&self, id: OverlayId) -> Option<Arc<MockSurface>> {
        self.attach_surface(id, Arc::new(MockSurface::new()))
    }

    /// Attach a specific surface to a rendered element.
    pub fn attach_surface(&self, id: OverlayId, surface: Arc<MockSurface>) -> Option<Arc<MockSurface>> {
        let mut state = self.state.lock().unwrap();
        let (_, element) = state.rendered.iter().rev().find(|(_, e)| e.id == id)?;
        element.slot.attach(surface.clone());
        state.surfaces.insert(id, surface.clone());
        Some(surface)
    }

    /// Surface attached for `id`, if any.
    pub fn surface(&self, id: OverlayId) -> Option<Arc<MockSurface>> {
        self.state.lock().unwrap().surfaces.get(&id).cloned()
    }

    /// Ids rendered so far, in render order.
    pub fn rendered_ids(&self) -> Vec<OverlayId> {
        self.state.lock().unwrap().rendered.iter().map(|(_, e)| e.id).collect()
    }

    /// Rendered element for `id`.
    pub fn element(&self, id: OverlayId) -> Option<OverlayElement> {
        self.state
            .lock()
            .unwrap()
            .rendered
            .iter()
            .find(|(_, e)| e.id == id)
            .map(|(_, e)| e.clone())
    }

    /// Container each render went to, in render order.
    pub fn containers(&self) -> Vec<String> {
        self.state.lock().unwrap().rendered.iter().map(|(c, _)| c.clone()).collect()
    }

    /// Ids destroyed so far, in destroy order.
    pub fn destroyed_ids(&self) -> Vec<OverlayId> {
        self.state.lock().unwrap().destroyed.clone()
    }

    pub fn render_count(&self) -> usize {
        self.state.lock().unwrap().rendered.len()
    }

    /// Rendered but not yet destroyed.
    pub fn mounted_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.rendered.len() - state.destroyed.len()
    }
}

impl Default for MockPortal {
    fn default() -> Self {
        Self::new()
    }
}

impl Portal for MockPortal {
    fn render(&self, container: &str, element: OverlayElement) -> Box<dyn PortalHandle> {
        let id = element.id;
        let mode = *self.mode.lock().unwrap();
        self.state
            .lock()
            .unwrap()
            .rendered
            .push((container.to_string(), element));

        if mode == AttachMode::Immediate {
            self.attach(id);
        }

        Box::new(MockPortalHandle {
            id,
            state: Arc::clone(&self.state),
        })
    }
}

struct MockPortalHandle {
    id: OverlayId,
    state: Arc<Mutex<PortalState>>,
}

impl PortalHandle for MockPortalHandle {
    fn destroy(&mut self) {
        self.state.lock().unwrap().destroyed.push(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OverlayKind;
    use crate::traits::SurfaceSlot;

    fn element(id: u64) -> OverlayElement {
        OverlayElement {
            id: OverlayId(id),
            kind: OverlayKind::Dialog,
            z_index: 1,
            title: "test".to_string(),
            slot: SurfaceSlot::new(),
        }
    }

    #[test]
    fn test_immediate_mode_attaches_on_render() {
        let portal = MockPortal::new();
        let el = element(1);
        let slot = el.slot.clone();
        let _handle = portal.render("root", el);
        assert!(slot.is_attached());
        assert!(portal.surface(OverlayId(1)).is_some());
        assert_eq!(portal.containers(), vec!["root".to_string()]);
    }

    #[test]
    fn test_manual_mode_waits_for_attach() {
        let portal = MockPortal::with_mode(AttachMode::Manual);
        let el = element(2);
        let slot = el.slot.clone();
        let mut handle = portal.render("root", el);
        assert!(!slot.is_attached());

        portal.attach(OverlayId(2));
        assert!(slot.is_attached());
        assert!(portal.attach(OverlayId(3)).is_none());

        handle.destroy();
        assert_eq!(portal.destroyed_ids(), vec![OverlayId(2)]);
        assert_eq!(portal.mounted_count(), 0);
    }
}
