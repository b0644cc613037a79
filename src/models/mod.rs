mod overlay;

pub use overlay::{
    CloseExtra, FormValues, OnClose, OverlayId, OverlayKind, FULL_WINDOW_CONTAINER,
    TOAST_CONTAINER,
};
