//! Protection against rapid repeated overlay triggers.
//!
//! Two independent layers:
//!
//! ```text
//! press ──▶ ProcessingGate (350ms, drop) ──▶ Debouncer (window, coalesce) ──▶ show()
//! ```
//!
//! The gate stops a second press from even starting; the debouncer folds
//! distinct calls that land inside one window into a single show.

mod debouncer;
mod processing;

pub use debouncer::Debouncer;
pub use processing::ProcessingGate;
