//! The handle contract shared by every overlay kind.

use async_trait::async_trait;

use crate::models::{CloseExtra, OverlayId};

/// Handle returned by `show` for any overlay kind.
///
/// `close` follows the deferred teardown contract: it resolves once the
/// overlay has been torn down, and repeated calls resolve against the same
/// teardown.
#[async_trait]
pub trait OverlayHandle: Send + Sync {
    /// Id of the overlay behind this handle.
    fn id(&self) -> OverlayId;

    /// Request close and wait for teardown.
    async fn close(&self, extra: CloseExtra);

    /// True until the overlay has been torn down.
    fn is_exist(&self) -> bool;
}
