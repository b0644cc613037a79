//! Shared overlay value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one overlay instance.
///
/// Ids come from a monotonically increasing counter starting at 1; `0` is
/// the "no id" value and always resolves to the z-index baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

impl OverlayId {
    /// The "no id" value.
    pub const NONE: OverlayId = OverlayId(0);

    /// Whether this id refers to an actual overlay.
    pub fn is_some(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of transient surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Dialog,
    Toast,
    ActionList,
    Popover,
}

impl OverlayKind {
    /// Portal container this kind renders into.
    pub fn container(&self) -> &'static str {
        match self {
            OverlayKind::Toast => TOAST_CONTAINER,
            _ => FULL_WINDOW_CONTAINER,
        }
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Dialog => "dialog",
            OverlayKind::Toast => "toast",
            OverlayKind::ActionList => "action_list",
            OverlayKind::Popover => "popover",
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portal container for dialogs, action lists and popovers.
pub const FULL_WINDOW_CONTAINER: &str = "full-window-overlay";

/// Portal container for toasts.
pub const TOAST_CONTAINER: &str = "toast-overlay";

/// Payload carried from a `close()` call to the `on_close` callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseExtra {
    /// Why the overlay closed (e.g. "confirm", "cancel", "back").
    pub flag: Option<String>,
}

impl CloseExtra {
    /// Extra with a flag set.
    pub fn flag(flag: impl Into<String>) -> Self {
        Self {
            flag: Some(flag.into()),
        }
    }
}

/// Values held by a dialog's form, if it has one.
pub type FormValues = serde_json::Value;

/// Callback fired after an overlay is torn down.
pub type OnClose = Box<dyn FnOnce(CloseExtra) + Send>;
