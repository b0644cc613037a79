//! Popovers and the select built on them.
//!
//! Unlike dialogs, a popover is mounted inline by its owner and opened and
//! closed repeatedly. Its open state is private to the instance.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::error::{OverlayError, OverlayResult};
use crate::manager::OverlayContext;
use crate::models::OverlayId;
use crate::stacking::OverlayZIndex;

/// Popover visibility phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverPhase {
    Closed,
    Open,
    /// Exit animation running
    Closing,
}

/// Snapshot of a popover's open state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopoverState {
    pub is_open: bool,
    pub z_index: i32,
}

/// Options for a popover.
#[derive(Debug, Clone, Default)]
pub struct PopoverConfig {
    pub title: String,
}

impl PopoverConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

struct PopoverShared {
    id: OverlayId,
    title: String,
    ctx: Arc<OverlayContext>,
    phase: watch::Sender<PopoverPhase>,
    tracker: Mutex<OverlayZIndex>,
}

impl PopoverShared {
    fn tracker(&self) -> MutexGuard<'_, OverlayZIndex> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A reusable popover.
#[derive(Clone)]
pub struct Popover(Arc<PopoverShared>);

impl Popover {
    pub(crate) fn new(ctx: Arc<OverlayContext>, config: PopoverConfig) -> Self {
        let id = ctx.ids.next_id();
        let tracker = OverlayZIndex::new(id, ctx.allocator.clone());
        let (phase, _) = watch::channel(PopoverPhase::Closed);
        Popover(Arc::new(PopoverShared {
            id,
            title: config.title,
            ctx,
            phase,
            tracker: Mutex::new(tracker),
        }))
    }

    pub fn id(&self) -> OverlayId {
        self.0.id
    }

    pub fn phase(&self) -> PopoverPhase {
        *self.0.phase.borrow()
    }

    pub fn state(&self) -> PopoverState {
        PopoverState {
            is_open: self.phase() == PopoverPhase::Open,
            z_index: self.0.tracker().z_index(),
        }
    }

    /// Open the popover and return its z-index.
    ///
    /// Opening while the previous close is still animating is refused with
    /// [`OverlayError::TeardownPending`]; the caller can retry once
    /// `close_popover` has resolved.
    pub fn open(&self) -> OverlayResult<i32> {
        // Phase only changes with the tracker locked, so the two stay in step
        let mut tracker = self.0.tracker();
        let previous = *self.0.phase.borrow();

        match previous {
            PopoverPhase::Closing => Err(OverlayError::TeardownPending { id: self.0.id }),
            PopoverPhase::Open => Ok(tracker.z_index()),
            PopoverPhase::Closed => {
                self.0.phase.send_replace(PopoverPhase::Open);
                let z_index = tracker.set_open(true);
                tracing::debug!("popover {} '{}' open at z={}", self.0.id, self.0.title, z_index);
                Ok(z_index)
            }
        }
    }

    /// Close and wait until the exit animation has finished.
    pub async fn close_popover(&self) {
        let started = {
            let mut tracker = self.0.tracker();
            let open = *self.0.phase.borrow() == PopoverPhase::Open;
            if open {
                self.0.phase.send_replace(PopoverPhase::Closing);
                tracker.set_open(false);
            }
            open
        };

        if started {
            let shared = Arc::clone(&self.0);
            tokio::spawn(async move {
                tokio::time::sleep(shared.ctx.policy.delay).await;
                let _tracker = shared.tracker();
                shared.phase.send_replace(PopoverPhase::Closed);
                tracing::debug!("popover {} closed", shared.id);
            });
        }

        let mut phase = self.0.phase.subscribe();
        let _ = phase.wait_for(|p| *p != PopoverPhase::Closing).await;
    }
}

impl fmt::Debug for Popover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popover")
            .field("id", &self.0.id)
            .field("title", &self.0.title)
            .field("phase", &self.phase())
            .finish()
    }
}

/// One option of a [`Select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub label: String,
    pub value: String,
}

impl SelectItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Options for a [`Select`].
#[derive(Clone, Default)]
pub struct SelectConfig {
    pub title: String,
    pub items: Vec<SelectItem>,
    pub value: Option<String>,
    on_change: Option<ChangeCallback>,
}

impl SelectConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: SelectItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn on_change(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for SelectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Popover-backed picker.
pub struct Select {
    popover: Popover,
    items: Vec<SelectItem>,
    value: Mutex<Option<String>>,
    on_change: Option<ChangeCallback>,
}

impl Select {
    pub(crate) fn new(ctx: Arc<OverlayContext>, config: SelectConfig) -> Self {
        let SelectConfig {
            title,
            items,
            value,
            on_change,
        } = config;
        Self {
            popover: Popover::new(ctx, PopoverConfig::new(title)),
            items,
            value: Mutex::new(value),
            on_change,
        }
    }

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }

    pub fn value(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn open(&self) -> OverlayResult<i32> {
        self.popover.open()
    }

    /// Pick `value` and close. Unknown values are ignored.
    pub async fn select(&self, value: &str) -> bool {
        if !self.items.iter().any(|item| item.value == value) {
            tracing::debug!("select {}: unknown value '{}'", self.popover.id(), value);
            return false;
        }

        let changed = {
            let mut current = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = current.as_deref() != Some(value);
            *current = Some(value.to_string());
            changed
        };
        if changed {
            if let Some(on_change) = &self.on_change {
                on_change(value);
            }
        }

        self.popover.close_popover().await;
        true
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("popover", &self.popover)
            .field("items", &self.items)
            .field("value", &self.value())
            .finish()
    }
}
