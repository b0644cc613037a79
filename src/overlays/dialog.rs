//! Dialogs.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::OverlayResult;
use crate::lifecycle::{InstanceHandle, LifecycleState, MountRequest};
use crate::manager::OverlayContext;
use crate::models::{CloseExtra, FormValues, OnClose, OverlayId, OverlayKind};
use crate::traits::OverlayHandle;

use super::addon::ScanAddOn;

/// Options for one dialog.
pub struct DialogConfig {
    pub title: String,
    pub description: Option<String>,
    /// Back presses and backdrop taps may close it (default: true)
    pub dismissable: bool,
    pub on_close: Option<OnClose>,
    pub scan_add_on: Option<ScanAddOn>,
}

impl DialogConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            dismissable: true,
            on_close: None,
            scan_add_on: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = dismissable;
        self
    }

    pub fn with_on_close(mut self, on_close: impl FnOnce(CloseExtra) + Send + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn with_scan_add_on(mut self, addon: ScanAddOn) -> Self {
        self.scan_add_on = Some(addon);
        self
    }
}

impl fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogConfig")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("dismissable", &self.dismissable)
            .field("on_close", &self.on_close.is_some())
            .field("scan_add_on", &self.scan_add_on)
            .finish()
    }
}

/// Handle returned by [`show`].
#[derive(Debug, Clone)]
pub struct DialogHandle {
    instance: InstanceHandle,
    scan_add_on: Option<ScanAddOn>,
}

impl DialogHandle {
    pub fn id(&self) -> OverlayId {
        self.instance.id()
    }

    pub fn z_index(&self) -> i32 {
        self.instance.z_index()
    }

    pub fn state(&self) -> LifecycleState {
        self.instance.state()
    }

    pub fn is_exist(&self) -> bool {
        self.instance.is_exist()
    }

    pub fn get_form(&self) -> Option<FormValues> {
        self.instance.get_form()
    }

    /// Request close and wait for teardown.
    pub async fn close(&self, extra: CloseExtra) {
        self.instance.close(extra).await;
    }

    /// Deliver a QR scan result to the dialog's scan add-on.
    pub fn scan(&self, payload: impl Into<String>) -> OverlayResult<()> {
        self.scan_add_on.clone().unwrap_or_default().invoke(payload)
    }

    pub fn instance(&self) -> &InstanceHandle {
        &self.instance
    }
}

#[async_trait]
impl OverlayHandle for DialogHandle {
    fn id(&self) -> OverlayId {
        self.instance.id()
    }

    async fn close(&self, extra: CloseExtra) {
        self.instance.close(extra).await;
    }

    fn is_exist(&self) -> bool {
        self.instance.is_exist()
    }
}

/// Mount a dialog and register it.
pub(crate) fn show(ctx: &Arc<OverlayContext>, config: DialogConfig) -> DialogHandle {
    let DialogConfig {
        title,
        description,
        dismissable,
        on_close,
        scan_add_on,
    } = config;

    if let Some(description) = &description {
        tracing::trace!("dialog '{}': {}", title, description);
    }

    let request = MountRequest::new(ctx.ids.next_id(), OverlayKind::Dialog, title)
        .with_dismissable(dismissable)
        .with_on_close(on_close);

    DialogHandle {
        instance: ctx.mount(request, true),
        scan_add_on,
    }
}
