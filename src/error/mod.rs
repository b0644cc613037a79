//! Error handling for the overlay layer.
//!
//! Error categories:
//!
//! | Category | Example | Retryable |
//! |----------|---------|-----------|
//! | Misuse | empty toast title (dev mode only) | No |
//! | MissingDependency | scan add-on without a scan callback | No |
//! | Lifecycle | reopening a popover mid-teardown | Yes |
//! | Configuration | zero retry interval, bad JSON | No |
//!
//! A close issued before the surface attached is not an error at all; it is
//! retried a bounded number of times and then dropped.

mod category;
mod overlay_error;
mod result;

pub use category::ErrorCategory;
pub use overlay_error::OverlayError;
pub use result::OverlayResult;
