//! Mock helpers for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `overlay_kit::adapters::mock` and adds a recorder for close callbacks.

pub use overlay_kit::adapters::mock::{AttachMode, MockClock, MockPortal, MockSurface};

use std::sync::{Arc, Mutex};

use overlay_kit::models::CloseExtra;

/// Collects what `on_close` callbacks receive, in firing order.
#[derive(Debug, Clone, Default)]
pub struct CloseRecorder {
    calls: Arc<Mutex<Vec<(String, CloseExtra)>>>,
}

#[allow(dead_code)]
impl CloseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback that records `label` with the extra it is fired with.
    pub fn callback(&self, label: &str) -> impl FnOnce(CloseExtra) + Send + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move |extra| calls.lock().unwrap().push((label, extra))
    }

    pub fn calls(&self) -> Vec<(String, CloseExtra)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls().into_iter().map(|(label, _)| label).collect()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}
