//! Registry of live dialog-like overlays.
//!
//! An overlay joins the registry right after its portal element is created
//! and leaves only once its deferred teardown has run, so membership covers
//! "visible or animating out", not just "open". The registry exists so that
//! a navigation reset or logout can close everything in one call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::future::join_all;

use crate::lifecycle::{InstanceHandle, LifecycleState, OverlayInstance};
use crate::models::{CloseExtra, OverlayId};

type Instances = Vec<InstanceHandle>;

/// Ordered list of registered overlay instances, oldest first.
#[derive(Debug, Clone, Default)]
pub struct DialogRegistry {
    instances: Arc<Mutex<Instances>>,
}

/// Non-owning reference held by instances so they can deregister themselves.
#[derive(Debug, Clone, Default)]
pub struct WeakDialogRegistry {
    instances: Weak<Mutex<Instances>>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance. Identity is the only uniqueness rule.
    pub fn add(&self, instance: InstanceHandle) {
        tracing::debug!("registry: add {} {}", instance.kind(), instance.id());
        let mut instances = self.lock();
        if instances.iter().any(|i| i.ptr_eq(&instance)) {
            return;
        }
        instances.push(instance);
    }

    /// Remove an instance by identity. Returns false if it was absent.
    pub fn remove(&self, instance: &InstanceHandle) -> bool {
        self.remove_where(|i| i.ptr_eq(instance))
    }

    pub(crate) fn remove_instance(&self, instance: &OverlayInstance) -> bool {
        self.remove_where(|i| i.is(instance))
    }

    fn remove_where(&self, pred: impl Fn(&InstanceHandle) -> bool) -> bool {
        let mut instances = self.lock();
        match instances.iter().position(pred) {
            Some(index) => {
                let removed = instances.remove(index);
                tracing::debug!("registry: remove {} {}", removed.kind(), removed.id());
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, instance: &InstanceHandle) -> bool {
        self.lock().iter().any(|i| i.ptr_eq(instance))
    }

    pub fn contains_id(&self, id: OverlayId) -> bool {
        self.lock().iter().any(|i| i.id() == id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Most recently registered instance.
    pub fn top(&self) -> Option<InstanceHandle> {
        self.lock().last().cloned()
    }

    /// Most recently registered instance that is still open. Instances
    /// already animating out are skipped.
    pub fn top_mounted(&self) -> Option<InstanceHandle> {
        self.lock()
            .iter()
            .rev()
            .find(|i| i.state() == LifecycleState::Mounted)
            .cloned()
    }

    /// Copy of the current list, oldest first.
    pub fn snapshot(&self) -> Vec<InstanceHandle> {
        self.lock().clone()
    }

    /// Close every registered instance and wait for all teardowns.
    pub async fn close_all(&self, extra: CloseExtra) {
        let instances = self.snapshot();
        if instances.is_empty() {
            return;
        }
        tracing::info!("registry: closing {} overlays", instances.len());
        join_all(instances.iter().map(|i| i.close(extra.clone()))).await;
    }

    pub fn downgrade(&self) -> WeakDialogRegistry {
        WeakDialogRegistry {
            instances: Arc::downgrade(&self.instances),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Instances> {
        self.instances.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WeakDialogRegistry {
    pub fn upgrade(&self) -> Option<DialogRegistry> {
        self.instances
            .upgrade()
            .map(|instances| DialogRegistry { instances })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockPortal;
    use crate::lifecycle::{MountRequest, TeardownPolicy};
    use crate::models::OverlayKind;
    use crate::stacking::ZIndexAllocator;

    fn mount(id: u64, portal: &MockPortal, allocator: &ZIndexAllocator) -> InstanceHandle {
        OverlayInstance::mount(
            MountRequest::new(OverlayId(id), OverlayKind::Dialog, "test"),
            TeardownPolicy::default(),
            portal,
            allocator.clone(),
            None,
        )
    }

    #[test]
    fn test_add_and_remove_by_identity() {
        let portal = MockPortal::new();
        let allocator = ZIndexAllocator::new(0);
        let registry = DialogRegistry::new();

        let a = mount(1, &portal, &allocator);
        let b = mount(2, &portal, &allocator);
        registry.add(a.clone());
        registry.add(b.clone());
        registry.add(a.clone());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.top().map(|i| i.id()), Some(OverlayId(2)));

        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert!(!registry.contains(&a));
        assert!(registry.contains_id(OverlayId(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_top_mounted_skips_closing_instances() {
        let portal = MockPortal::new();
        let allocator = ZIndexAllocator::new(0);
        let registry = DialogRegistry::new();
        let a = mount(1, &portal, &allocator);
        let b = mount(2, &portal, &allocator);
        registry.add(a.clone());
        registry.add(b.clone());

        let closing = tokio::spawn({
            let b = b.clone();
            async move { b.close(CloseExtra::default()).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        assert_eq!(registry.top().map(|i| i.id()), Some(OverlayId(2)));
        assert_eq!(registry.top_mounted().map(|i| i.id()), Some(OverlayId(1)));
        closing.await.unwrap();
    }

    #[test]
    fn test_weak_reference_does_not_keep_registry_alive() {
        let registry = DialogRegistry::new();
        let weak = registry.downgrade();
        assert!(weak.upgrade().is_some());
        drop(registry);
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_all_on_empty_registry_returns() {
        let registry = DialogRegistry::new();
        registry.close_all(CloseExtra::default()).await;
        assert!(registry.is_empty());
    }
}
