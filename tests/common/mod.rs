//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures for driving an
//! [`OverlayManager`] against the recording portal under paused tokio time.
//!
//! # Example
//!
//! ```ignore
//! use common::TestManagerBuilder;
//!
//! let fixture = TestManagerBuilder::new().with_baseline(10).build();
//! let dialog = fixture.manager.show_dialog(DialogConfig::new("Confirm"));
//! assert_eq!(fixture.portal.rendered_ids(), vec![dialog.id()]);
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use overlay_kit::adapters::mock::{AttachMode, MockClock, MockPortal};
use overlay_kit::adapters::TokioClock;
use overlay_kit::traits::Clock;
use overlay_kit::{OverlayConfig, OverlayManager, Platform};
use tokio::time::Instant;

/// Manager plus the doubles it was built with.
pub struct TestManager {
    pub manager: OverlayManager,
    pub portal: Arc<MockPortal>,
    /// Present when built with [`TestManagerBuilder::with_mock_clock`]
    #[allow(dead_code)]
    pub clock: Option<Arc<MockClock>>,
}

/// Builder for test managers.
///
/// Defaults to the web platform (250 ms teardown), baseline 100 and the
/// tokio clock, so paused-time sleeps drive every timer.
pub struct TestManagerBuilder {
    config: OverlayConfig,
    attach_mode: AttachMode,
    mock_clock: bool,
}

#[allow(dead_code)]
impl TestManagerBuilder {
    pub fn new() -> Self {
        Self {
            config: OverlayConfig::default()
                .with_platform(Platform::Web)
                .with_z_index_baseline(100)
                .with_dev_mode(true),
            attach_mode: AttachMode::Immediate,
            mock_clock: false,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.config = self.config.with_platform(platform);
        self
    }

    pub fn with_baseline(mut self, baseline: i32) -> Self {
        self.config = self.config.with_z_index_baseline(baseline);
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.config = self.config.with_dev_mode(dev_mode);
        self
    }

    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// Surfaces only attach when the test calls `portal.attach(id)`.
    pub fn with_manual_attach(mut self) -> Self {
        self.attach_mode = AttachMode::Manual;
        self
    }

    /// Use a manually advanced clock for gates and toast ids.
    pub fn with_mock_clock(mut self) -> Self {
        self.mock_clock = true;
        self
    }

    pub fn build(self) -> TestManager {
        let portal = Arc::new(MockPortal::with_mode(self.attach_mode));
        let (clock, mock): (Arc<dyn Clock>, Option<Arc<MockClock>>) = if self.mock_clock {
            let mock = Arc::new(MockClock::new());
            (mock.clone(), Some(mock))
        } else {
            (Arc::new(TokioClock), None)
        };

        TestManager {
            manager: OverlayManager::new(self.config, portal.clone(), clock),
            portal,
            clock: mock,
        }
    }
}

/// Manager with default test settings.
#[allow(dead_code)]
pub fn test_manager() -> TestManager {
    TestManagerBuilder::new().build()
}

/// Assert that `expected` has passed since `start`, within one timer tick.
#[allow(dead_code)]
pub fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "expected ~{:?}, got {:?}",
        expected,
        elapsed
    );
}

/// Let spawned tasks run without moving the paused clock meaningfully.
#[allow(dead_code)]
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
