//! Toasts and duplicate suppression by toast id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{OverlayError, OverlayResult};
use crate::lifecycle::{InstanceHandle, LifecycleState, MountRequest};
use crate::manager::OverlayContext;
use crate::models::{CloseExtra, OverlayId, OverlayKind};
use crate::traits::{Clock, OverlayHandle};

/// Visual tone of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastTone {
    #[default]
    Message,
    Success,
    Error,
}

/// Options for one toast.
#[derive(Debug, Clone, Default)]
pub struct ToastConfig {
    pub title: String,
    pub message: Option<String>,
    pub tone: ToastTone,
    /// Visible time before auto-dismiss; manager default if unset
    pub duration: Option<Duration>,
    /// Toasts sharing an id are not shown twice within the suppress window
    pub toast_id: Option<String>,
}

impl ToastConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title).with_tone(ToastTone::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title).with_tone(ToastTone::Error)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_tone(mut self, tone: ToastTone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_toast_id(mut self, toast_id: impl Into<String>) -> Self {
        self.toast_id = Some(toast_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct ToastIdEntry {
    /// Toast that recorded the id
    owner: OverlayId,
    created_at: Instant,
    suppress_window: Duration,
}

impl ToastIdEntry {
    fn is_active(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) < self.suppress_window
    }
}

/// Tracks recently shown toast ids.
pub struct ToastIdRegistry {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, ToastIdEntry>>,
}

impl ToastIdRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record `toast_id` for toast `owner` unless it is still inside its
    /// window. Returns false when the show should be suppressed.
    pub fn try_record(&self, toast_id: &str, owner: OverlayId, suppress_window: Duration) -> bool {
        let now = self.clock.now();
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.is_active(now));

        if entries.contains_key(toast_id) {
            return false;
        }
        entries.insert(
            toast_id.to_string(),
            ToastIdEntry {
                owner,
                created_at: now,
                suppress_window,
            },
        );
        true
    }

    /// Forget `toast_id` so it can be shown again.
    pub fn remove(&self, toast_id: &str) -> bool {
        self.lock().remove(toast_id).is_some()
    }

    /// Forget `toast_id` only if `owner` recorded it. A stale handle must not
    /// free the window of a later toast reusing the id.
    pub fn release(&self, toast_id: &str, owner: OverlayId) -> bool {
        let mut entries = self.lock();
        match entries.get(toast_id) {
            Some(entry) if entry.owner == owner => entries.remove(toast_id).is_some(),
            _ => false,
        }
    }

    /// Whether `toast_id` would currently be suppressed.
    pub fn is_suppressed(&self, toast_id: &str) -> bool {
        let now = self.clock.now();
        self.lock()
            .get(toast_id)
            .is_some_and(|entry| entry.is_active(now))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ToastIdEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ToastIdRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastIdRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

/// Handle returned by [`show`].
#[derive(Debug, Clone)]
pub struct ToastHandle {
    instance: InstanceHandle,
    toast_id: Option<String>,
    ctx: Arc<OverlayContext>,
}

impl ToastHandle {
    pub fn id(&self) -> OverlayId {
        self.instance.id()
    }

    pub fn toast_id(&self) -> Option<&str> {
        self.toast_id.as_deref()
    }

    pub fn state(&self) -> LifecycleState {
        self.instance.state()
    }

    pub fn is_exist(&self) -> bool {
        self.instance.is_exist()
    }

    /// Dismiss early. Frees the toast id for immediate reuse.
    pub async fn close(&self, extra: CloseExtra) {
        if let Some(toast_id) = &self.toast_id {
            self.ctx.toasts.release(toast_id, self.instance.id());
        }
        self.instance.close(extra).await;
    }
}

#[async_trait]
impl OverlayHandle for ToastHandle {
    fn id(&self) -> OverlayId {
        self.instance.id()
    }

    async fn close(&self, extra: CloseExtra) {
        ToastHandle::close(self, extra).await;
    }

    fn is_exist(&self) -> bool {
        self.instance.is_exist()
    }
}

/// Show a toast. `Ok(None)` means a toast with the same id is still inside
/// its suppress window.
pub(crate) fn show(
    ctx: &Arc<OverlayContext>,
    config: ToastConfig,
) -> OverlayResult<Option<ToastHandle>> {
    if ctx.config.dev_mode && config.title.trim().is_empty() {
        return Err(OverlayError::EmptyToastTitle);
    }

    let duration = config.duration.unwrap_or(ctx.config.toast_default_duration);
    let id = ctx.ids.next_id();
    if let Some(toast_id) = &config.toast_id {
        let window = duration + ctx.config.toast_suppress_margin;
        if !ctx.toasts.try_record(toast_id, id, window) {
            tracing::debug!("toast '{}' suppressed: shown within {:?}", toast_id, window);
            return Ok(None);
        }
    }

    let request = MountRequest::new(id, OverlayKind::Toast, config.title)
        .with_dismissable(false);
    let instance = ctx.mount(request, false);

    let auto_dismiss = instance.clone();
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        auto_dismiss.close(CloseExtra::flag("timeout")).await;
    });

    Ok(Some(ToastHandle {
        instance,
        toast_id: config.toast_id,
        ctx: Arc::clone(ctx),
    }))
}
