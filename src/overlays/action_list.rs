//! Action lists and their press-guarded trigger.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::gate::ProcessingGate;
use crate::lifecycle::{InstanceHandle, LifecycleState, MountRequest};
use crate::manager::OverlayContext;
use crate::models::{CloseExtra, OverlayId, OverlayKind};
use crate::traits::OverlayHandle;

type ItemAction = Arc<dyn Fn() + Send + Sync>;

/// One row of an action list.
#[derive(Clone)]
pub struct ActionItem {
    pub label: String,
    pub destructive: bool,
    pub disabled: bool,
    on_press: Option<ItemAction>,
}

impl ActionItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            destructive: false,
            disabled: false,
            on_press: None,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn on_press(mut self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_press = Some(Arc::new(action));
        self
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("label", &self.label)
            .field("destructive", &self.destructive)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Options for an action list.
#[derive(Debug, Clone, Default)]
pub struct ActionListConfig {
    pub title: String,
    pub items: Vec<ActionItem>,
}

impl ActionListConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: ActionItem) -> Self {
        self.items.push(item);
        self
    }
}

/// Handle to an open action list.
#[derive(Debug, Clone)]
pub struct ActionListHandle {
    instance: InstanceHandle,
    items: Arc<[ActionItem]>,
}

impl ActionListHandle {
    pub fn id(&self) -> OverlayId {
        self.instance.id()
    }

    pub fn state(&self) -> LifecycleState {
        self.instance.state()
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    /// Run the item's action, then close the list.
    ///
    /// The action runs while the list is still open. Out-of-range and
    /// disabled items are ignored. Returns whether an item ran.
    pub async fn select(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index).filter(|item| !item.disabled) else {
            return false;
        };
        tracing::debug!("action list {}: '{}' selected", self.id(), item.label);
        if let Some(action) = &item.on_press {
            action();
        }
        self.instance.close(CloseExtra::flag("select")).await;
        true
    }

    pub async fn close(&self, extra: CloseExtra) {
        self.instance.close(extra).await;
    }
}

#[async_trait]
impl OverlayHandle for ActionListHandle {
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

/// Button that opens an action list, ignoring repeat presses while the
/// previous one is still being processed.
pub struct ActionListTrigger {
    ctx: Arc<OverlayContext>,
    config: ActionListConfig,
    gate: ProcessingGate,
}

impl ActionListTrigger {
    pub(crate) fn new(ctx: Arc<OverlayContext>, config: ActionListConfig) -> Self {
        let gate = ProcessingGate::new(ctx.config.processing_cooldown, Arc::clone(&ctx.clock));
        Self { ctx, config, gate }
    }

    /// Open the list, or return None if the press was dropped.
    pub fn press(&self) -> Option<ActionListHandle> {
        if !self.gate.try_enter() {
            return None;
        }
        Some(show(&self.ctx, self.config.clone()))
    }

    pub fn is_processing(&self) -> bool {
        self.gate.is_processing()
    }
}

impl fmt::Debug for ActionListTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionListTrigger")
            .field("title", &self.config.title)
            .field("gate", &self.gate)
            .finish()
    }
}

/// Mount an action list and register it.
pub(crate) fn show(ctx: &Arc<OverlayContext>, config: ActionListConfig) -> ActionListHandle {
    let request = MountRequest::new(ctx.ids.next_id(), OverlayKind::ActionList, config.title);
    ActionListHandle {
        instance: ctx.mount(request, true),
        items: config.items.into(),
    }
}
