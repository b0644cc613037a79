//! Back-button interception.

/// Receives hardware/OS back presses from the navigation layer.
///
/// Returning `true` consumes the press so navigation does not pop a screen.
pub trait BackHandler: Send + Sync {
    fn on_back_press(&self) -> bool;
}
