//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use overlay_kit::prelude::*;
//! ```
//!
//! This will import:
//! - The manager and its configuration
//! - Per-kind overlay configs and handles
//! - Close payloads and ids
//! - The host-facing traits

// Manager and configuration
pub use crate::config::{OverlayConfig, Platform};
pub use crate::manager::OverlayManager;

// Errors
pub use crate::error::{OverlayError, OverlayResult};

// Overlay kinds
pub use crate::overlays::{
    ActionItem, ActionListConfig, ActionListHandle, ActionListTrigger, DialogConfig, DialogHandle,
    Popover, PopoverConfig, ScanAddOn, Select, SelectConfig, SelectItem, ToastConfig, ToastHandle,
    ToastTone,
};

// Model types
pub use crate::models::{CloseExtra, OverlayId, OverlayKind};

// Host-facing traits
pub use crate::traits::{BackHandler, Clock, OverlayHandle, OverlaySurface, Portal, PortalHandle};
