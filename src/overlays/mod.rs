//! Per-kind overlay surfaces.
//!
//! Every kind hands back a handle whose `close(extra)` follows the deferred
//! teardown contract in [`crate::lifecycle`].

pub mod action_list;
pub mod addon;
pub mod dialog;
pub mod popover;
pub mod toast;

pub use action_list::{ActionItem, ActionListConfig, ActionListHandle, ActionListTrigger};
pub use addon::{ScanAddOn, ScanCallback};
pub use dialog::{DialogConfig, DialogHandle};
pub use popover::{Popover, PopoverConfig, PopoverPhase, PopoverState, Select, SelectConfig, SelectItem};
pub use toast::{ToastConfig, ToastHandle, ToastIdRegistry, ToastTone};
