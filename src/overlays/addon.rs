//! Optional add-ons attached to dialog inputs.

use std::fmt;
use std::sync::Arc;

use crate::error::{OverlayError, OverlayResult};

/// Callback receiving a scanned QR payload.
pub type ScanCallback = Arc<dyn Fn(String) + Send + Sync>;

/// QR-scan button next to an address/amount input.
///
/// The scan result is useless without a receiver, so invoking the add-on
/// without `on_scan` fails at the moment of use.
#[derive(Clone, Default)]
pub struct ScanAddOn {
    on_scan: Option<ScanCallback>,
}

impl ScanAddOn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_scan(mut self, on_scan: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_scan = Some(Arc::new(on_scan));
        self
    }

    pub fn has_receiver(&self) -> bool {
        self.on_scan.is_some()
    }

    /// Deliver a scan result.
    pub fn invoke(&self, payload: impl Into<String>) -> OverlayResult<()> {
        let on_scan = self
            .on_scan
            .as_ref()
            .ok_or_else(|| OverlayError::missing("on_scan"))?;
        on_scan(payload.into());
        Ok(())
    }
}

impl fmt::Debug for ScanAddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanAddOn")
            .field("on_scan", &self.on_scan.is_some())
            .finish()
    }
}
