//! The overlay manager.
//!
//! Owns every piece of shared overlay state (id counter, z-index stack,
//! dialog registry, toast ids) and is passed to whoever needs to show
//! overlays. Cloning is cheap and clones share state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::OverlayConfig;
use crate::error::OverlayResult;
use crate::gate::Debouncer;
use crate::lifecycle::{InstanceHandle, MountRequest, OverlayInstance, TeardownPolicy};
use crate::models::{CloseExtra, OverlayId};
use crate::overlays::{
    action_list, dialog, toast, ActionListConfig, ActionListHandle, ActionListTrigger,
    DialogConfig, DialogHandle, Popover, PopoverConfig, Select, SelectConfig, ToastConfig,
    ToastHandle, ToastIdRegistry,
};
use crate::registry::DialogRegistry;
use crate::stacking::{OverlayEntry, OverlayIdAllocator, ZIndexAllocator};
use crate::traits::{BackHandler, Clock, Portal};

/// State shared by the manager and every overlay it creates.
pub(crate) struct OverlayContext {
    pub(crate) config: OverlayConfig,
    pub(crate) policy: TeardownPolicy,
    pub(crate) portal: Arc<dyn Portal>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: OverlayIdAllocator,
    pub(crate) allocator: ZIndexAllocator,
    pub(crate) registry: DialogRegistry,
    pub(crate) toasts: ToastIdRegistry,
}

impl OverlayContext {
    /// Mount through the portal; `register` adds it to the dialog registry.
    pub(crate) fn mount(&self, request: MountRequest, register: bool) -> InstanceHandle {
        OverlayInstance::mount(
            request,
            self.policy,
            self.portal.as_ref(),
            self.allocator.clone(),
            register.then_some(&self.registry),
        )
    }
}

impl fmt::Debug for OverlayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayContext")
            .field("platform", &self.config.platform)
            .field("policy", &self.policy)
            .field("open_overlays", &self.allocator.len())
            .field("registered", &self.registry.len())
            .finish()
    }
}

/// Entry point for showing overlays.
///
/// # Example
///
/// ```ignore
/// let manager = OverlayManager::new(OverlayConfig::from_env(), Arc::new(LogPortal), Arc::new(TokioClock));
///
/// let dialog = manager.show_dialog(DialogConfig::new("Confirm transfer"));
/// dialog.close(CloseExtra::flag("confirm")).await;
/// ```
#[derive(Debug, Clone)]
pub struct OverlayManager {
    ctx: Arc<OverlayContext>,
}

impl OverlayManager {
    pub fn new(config: OverlayConfig, portal: Arc<dyn Portal>, clock: Arc<dyn Clock>) -> Self {
        tracing::debug!(
            "overlay manager: platform={:?} baseline={} teardown={:?}",
            config.platform,
            config.z_index_baseline,
            config.teardown_delay()
        );
        let ctx = OverlayContext {
            policy: TeardownPolicy::from_config(&config),
            allocator: ZIndexAllocator::new(config.z_index_baseline),
            toasts: ToastIdRegistry::new(Arc::clone(&clock)),
            ids: OverlayIdAllocator::new(),
            registry: DialogRegistry::new(),
            config,
            portal,
            clock,
        };
        Self { ctx: Arc::new(ctx) }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.ctx.config
    }

    /// Show a dialog. Must be called within a tokio runtime.
    pub fn show_dialog(&self, config: DialogConfig) -> DialogHandle {
        dialog::show(&self.ctx, config)
    }

    /// Show a toast, or `Ok(None)` if its id is still suppressed.
    pub fn show_toast(&self, config: ToastConfig) -> OverlayResult<Option<ToastHandle>> {
        toast::show(&self.ctx, config)
    }

    /// Show an action list directly, bypassing the trigger gate.
    pub fn show_action_list(&self, config: ActionListConfig) -> ActionListHandle {
        action_list::show(&self.ctx, config)
    }

    /// Trigger that opens `config` on press, dropping repeat presses.
    pub fn action_list_trigger(&self, config: ActionListConfig) -> ActionListTrigger {
        ActionListTrigger::new(Arc::clone(&self.ctx), config)
    }

    pub fn popover(&self, config: PopoverConfig) -> Popover {
        Popover::new(Arc::clone(&self.ctx), config)
    }

    pub fn select(&self, config: SelectConfig) -> Select {
        Select::new(Arc::clone(&self.ctx), config)
    }

    /// Dialog show entry point wrapped in a trailing debounce of `window`.
    /// Pass `config().show_debounce_window` for the configured default.
    ///
    /// The shown dialog's handle is not returned. It is registered like any
    /// other dialog, so it closes through [`registry`](Self::registry),
    /// [`close_all_dialogs`](Self::close_all_dialogs) or a back press.
    pub fn debounced_dialog(&self, window: Duration) -> Debouncer<DialogConfig> {
        let manager = self.clone();
        Debouncer::new(window, move |config| {
            manager.show_dialog(config);
        })
    }

    /// Close every registered dialog and action list.
    pub async fn close_all_dialogs(&self, extra: CloseExtra) {
        self.ctx.registry.close_all(extra).await;
    }

    /// Route a hardware/OS back press to the topmost open dialog.
    ///
    /// A dismissable dialog is closed in the background. A non-dismissable
    /// one swallows the press so navigation cannot pop the screen under it.
    /// Returns false only when no dialog is open.
    pub fn handle_back_press(&self) -> bool {
        let Some(top) = self.ctx.registry.top_mounted() else {
            return false;
        };
        if !top.is_dismissable() {
            tracing::debug!("back press blocked by {} {}", top.kind(), top.id());
            return true;
        }
        tracing::debug!("back press closes {} {}", top.kind(), top.id());
        tokio::spawn(async move {
            top.close(CloseExtra::flag("back")).await;
        });
        true
    }

    /// Z-index currently assigned to `id`, or the baseline.
    pub fn z_index_of(&self, id: OverlayId) -> i32 {
        self.ctx.allocator.z_index_for(id)
    }

    pub fn z_index_baseline(&self) -> i32 {
        self.ctx.allocator.baseline()
    }

    /// Open overlays on the z-index stack, bottom first.
    pub fn stack_snapshot(&self) -> Vec<OverlayEntry> {
        self.ctx.allocator.snapshot()
    }

    /// Registered dialogs and action lists, including ones animating out.
    pub fn open_dialog_count(&self) -> usize {
        self.ctx.registry.len()
    }

    pub fn registry(&self) -> &DialogRegistry {
        &self.ctx.registry
    }

    pub fn toast_ids(&self) -> &ToastIdRegistry {
        &self.ctx.toasts
    }
}

impl BackHandler for OverlayManager {
    fn on_back_press(&self) -> bool {
        self.handle_back_press()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockClock, MockPortal};

    fn manager() -> (OverlayManager, Arc<MockPortal>) {
        let portal = Arc::new(MockPortal::new());
        let manager = OverlayManager::new(
            OverlayConfig::default().with_z_index_baseline(10),
            portal.clone(),
            Arc::new(MockClock::new()),
        );
        (manager, portal)
    }

    #[tokio::test(start_paused = true)]
    async fn test_dialogs_stack_in_open_order() {
        let (manager, portal) = manager();
        let a = manager.show_dialog(DialogConfig::new("a"));
        let b = manager.show_dialog(DialogConfig::new("b"));

        assert_eq!(a.z_index(), 10);
        assert_eq!(b.z_index(), 11);
        assert_eq!(manager.open_dialog_count(), 2);
        assert_eq!(portal.element(b.id()).map(|e| e.z_index), Some(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_press_without_dialogs_is_not_consumed() {
        let (manager, _) = manager();
        assert!(!manager.on_back_press());
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_press_blocked_by_non_dismissable_top() {
        let (manager, _) = manager();
        let wallet = manager.show_dialog(DialogConfig::new("wallet"));
        let signing = manager.show_dialog(DialogConfig::new("signing").with_dismissable(false));

        assert!(manager.handle_back_press());
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;

        assert!(wallet.is_exist());
        assert!(signing.is_exist());
        assert_eq!(manager.open_dialog_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_press_consumed_while_only_locked_dialog_open() {
        let (manager, _) = manager();
        let locked = manager.show_dialog(DialogConfig::new("locked").with_dismissable(false));

        assert!(manager.handle_back_press());
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        assert!(locked.is_exist());
    }
}
