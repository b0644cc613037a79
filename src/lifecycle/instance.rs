//! Deferred teardown of a mounted overlay.
//!
//! A close request starts the exit animation right away but holds on to the
//! surface, the portal mount and the registry entry until the animation has
//! had time to finish. All three are released together, after which the
//! caller's `on_close` fires with the payload of the first close.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::models::{CloseExtra, FormValues, OnClose, OverlayId, OverlayKind};
use crate::registry::{DialogRegistry, WeakDialogRegistry};
use crate::stacking::{OverlayZIndex, ZIndexAllocator};
use crate::traits::{OverlayElement, OverlaySurface, Portal, PortalHandle, SurfaceSlot};

use super::state::{LifecycleState, TeardownPolicy};

/// Everything needed to mount one overlay.
pub struct MountRequest {
    pub id: OverlayId,
    pub kind: OverlayKind,
    pub title: String,
    /// Whether back presses may close it
    pub dismissable: bool,
    pub on_close: Option<OnClose>,
}

impl MountRequest {
    pub fn new(id: OverlayId, kind: OverlayKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            dismissable: true,
            on_close: None,
        }
    }

    pub fn with_dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = dismissable;
        self
    }

    pub fn with_on_close(mut self, on_close: Option<OnClose>) -> Self {
        self.on_close = on_close;
        self
    }
}

impl fmt::Debug for MountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountRequest")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("dismissable", &self.dismissable)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

struct Inner {
    state: LifecycleState,
    portal: Option<Box<dyn PortalHandle>>,
    z_index: Option<OverlayZIndex>,
    pending_extra: Option<CloseExtra>,
    on_close: Option<OnClose>,
}

/// One mounted overlay and its teardown state machine.
pub struct OverlayInstance {
    id: OverlayId,
    kind: OverlayKind,
    title: String,
    dismissable: bool,
    z_index: i32,
    slot: SurfaceSlot,
    policy: TeardownPolicy,
    registry: WeakDialogRegistry,
    inner: Mutex<Inner>,
    torn_down: watch::Sender<bool>,
}

impl OverlayInstance {
    /// Allocate a z-index, mount through the portal and (optionally) join
    /// the registry.
    pub fn mount(
        request: MountRequest,
        policy: TeardownPolicy,
        portal: &dyn Portal,
        allocator: ZIndexAllocator,
        registry: Option<&DialogRegistry>,
    ) -> InstanceHandle {
        let MountRequest {
            id,
            kind,
            title,
            dismissable,
            on_close,
        } = request;

        let mut tracker = OverlayZIndex::new(id, allocator);
        let z_index = tracker.set_open(true);
        let slot = SurfaceSlot::new();

        let portal_handle = portal.render(
            kind.container(),
            OverlayElement {
                id,
                kind,
                z_index,
                title: title.clone(),
                slot: slot.clone(),
            },
        );

        let (torn_down, _) = watch::channel(false);
        let handle = InstanceHandle(Arc::new(OverlayInstance {
            id,
            kind,
            title,
            dismissable,
            z_index,
            slot,
            policy,
            registry: registry.map(DialogRegistry::downgrade).unwrap_or_default(),
            inner: Mutex::new(Inner {
                state: LifecycleState::Mounted,
                portal: Some(portal_handle),
                z_index: Some(tracker),
                pending_extra: None,
                on_close,
            }),
            torn_down,
        }));

        if let Some(registry) = registry {
            registry.add(handle.clone());
        }
        tracing::debug!("{} {} mounted at z={}", kind, id, z_index);
        handle
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> LifecycleState {
        self.lock().state
    }

    /// Wait for the surface to attach, within the retry budget.
    async fn wait_for_surface(&self) -> Option<Arc<dyn OverlaySurface>> {
        let mut attempt = 0;
        loop {
            if self.state() == LifecycleState::TornDown {
                return None;
            }
            if let Some(surface) = self.slot.get() {
                return Some(surface);
            }
            if attempt >= self.policy.retry_attempts {
                tracing::debug!(
                    "{} {} never attached after {} retries, dropping close",
                    self.kind,
                    self.id,
                    attempt
                );
                return None;
            }
            attempt += 1;
            tracing::trace!("{} {} not attached, retry {}", self.kind, self.id, attempt);
            tokio::time::sleep(self.policy.retry_interval).await;
        }
    }

    /// Move to `CloseRequested`. Returns false if a close is already underway.
    fn request_close(&self, extra: CloseExtra) -> bool {
        let mut inner = self.lock();
        if inner.state != LifecycleState::Mounted {
            return false;
        }
        inner.state = LifecycleState::CloseRequested;
        inner.pending_extra = Some(extra);
        if let Some(tracker) = inner.z_index.as_mut() {
            tracker.set_open(false);
        }
        true
    }

    /// Release surface, portal and registry entry, then fire `on_close`.
    fn tear_down(&self) {
        let (portal, tracker, on_close, extra) = {
            let mut inner = self.lock();
            if inner.state == LifecycleState::TornDown {
                return;
            }
            inner.state = LifecycleState::TornDown;
            (
                inner.portal.take(),
                inner.z_index.take(),
                inner.on_close.take(),
                inner.pending_extra.take().unwrap_or_default(),
            )
        };

        self.slot.take();
        if let Some(mut portal) = portal {
            portal.destroy();
        }
        drop(tracker);
        if let Some(registry) = self.registry.upgrade() {
            registry.remove_instance(self);
        }
        self.torn_down.send_replace(true);
        tracing::debug!("{} {} torn down", self.kind, self.id);

        if let Some(on_close) = on_close {
            on_close(extra);
        }
    }
}

impl fmt::Debug for OverlayInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayInstance")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.state())
            .field("z_index", &self.z_index)
            .finish()
    }
}

/// Shared handle to an [`OverlayInstance`].
#[derive(Debug, Clone)]
pub struct InstanceHandle(Arc<OverlayInstance>);

impl InstanceHandle {
    pub fn id(&self) -> OverlayId {
        self.0.id
    }

    pub fn kind(&self) -> OverlayKind {
        self.0.kind
    }

    pub fn title(&self) -> &str {
        &self.0.title
    }

    /// Z-index assigned at mount.
    pub fn z_index(&self) -> i32 {
        self.0.z_index
    }

    pub fn state(&self) -> LifecycleState {
        self.0.state()
    }

    pub fn is_dismissable(&self) -> bool {
        self.0.dismissable
    }

    /// True until the instance has been torn down.
    pub fn is_exist(&self) -> bool {
        self.state() != LifecycleState::TornDown
    }

    /// Whether the rendered surface has attached.
    pub fn is_attached(&self) -> bool {
        self.0.slot.is_attached()
    }

    /// Form values from the attached surface.
    pub fn get_form(&self) -> Option<FormValues> {
        self.0.slot.get().and_then(|surface| surface.form())
    }

    /// Request close and wait for teardown.
    ///
    /// If the surface has not attached yet the call retries on the policy
    /// interval and silently gives up once the retries run out. Only the
    /// first close schedules teardown; later calls wait on the same one and
    /// their `extra` is ignored.
    pub async fn close(&self, extra: CloseExtra) {
        let Some(surface) = self.0.wait_for_surface().await else {
            return;
        };

        let mut torn_down = self.0.torn_down.subscribe();
        if self.0.request_close(extra) {
            tracing::debug!(
                "{} {} close requested, teardown in {:?}",
                self.0.kind,
                self.0.id,
                self.0.policy.delay
            );
            surface.set_open(false);
            self.schedule_teardown();
        }

        // Sender lives in the instance we hold, so this only ends on `true`.
        let _ = torn_down.wait_for(|done| *done).await;
    }

    fn schedule_teardown(&self) {
        let instance = Arc::clone(&self.0);
        tokio::spawn(async move {
            tokio::time::sleep(instance.policy.delay).await;
            instance.tear_down();
        });
    }

    /// Same underlying instance.
    pub fn ptr_eq(&self, other: &InstanceHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn is(&self, instance: &OverlayInstance) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.0), instance)
    }
}
