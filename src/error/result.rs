//! Result type alias for overlay operations.

use super::overlay_error::OverlayError;

/// Type alias for Results using OverlayError.
///
/// # Example
///
/// ```ignore
/// use overlay_kit::error::OverlayResult;
///
/// fn show(config: ToastConfig) -> OverlayResult<Option<ToastHandle>> {
///     // ...
/// }
/// ```
pub type OverlayResult<T> = Result<T, OverlayError>;
