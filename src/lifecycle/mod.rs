//! Deferred teardown scheduling.
//!
//! "Logical close" (the user or business code wants the overlay gone) and
//! "physical teardown" (unmount, release handles, leave the registry) are
//! separated by the exit animation's fixed duration.

mod instance;
mod state;

pub use instance::{InstanceHandle, MountRequest, OverlayInstance};
pub use state::{LifecycleState, TeardownPolicy};
