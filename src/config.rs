//! Overlay configuration.
//!
//! Timing constants differ per platform (native exit animations run a little
//! longer than web ones), so the platform picks the defaults and every value
//! can still be overridden explicitly.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{OverlayError, OverlayResult};

/// Default z-index for the first overlay on an empty stack.
pub const DEFAULT_Z_INDEX_BASELINE: i32 = 100_000;

/// Z-index range that must stay free above the baseline.
pub const Z_INDEX_HEADROOM: i32 = 1_000_000;

/// Interval between attempts when closing an overlay whose surface has not attached.
pub const ATTACH_RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Number of attach attempts before a close request is abandoned.
pub const ATTACH_RETRY_ATTEMPTS: u32 = 10;

/// Cooldown during which a trigger ignores repeated presses.
pub const PROCESSING_COOLDOWN: Duration = Duration::from_millis(350);

/// Added to a toast's duration to form its duplicate-suppression window.
pub const TOAST_SUPPRESS_MARGIN: Duration = Duration::from_millis(500);

/// Target platform; selects timing defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Web,
    Desktop,
    Extension,
}

impl Platform {
    /// Whether this is a native mobile platform.
    pub fn is_native(&self) -> bool {
        matches!(self, Platform::Ios | Platform::Android)
    }

    /// Exit animation length used to defer teardown.
    pub fn teardown_delay(&self) -> Duration {
        if self.is_native() {
            Duration::from_millis(300)
        } else {
            Duration::from_millis(250)
        }
    }

    /// Parse a platform name as used in `OVERLAY_PLATFORM`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ios" => Some(Platform::Ios),
            "android" => Some(Platform::Android),
            "web" => Some(Platform::Web),
            "desktop" => Some(Platform::Desktop),
            "ext" | "extension" => Some(Platform::Extension),
            _ => None,
        }
    }
}

/// Configuration for the overlay manager.
///
/// Use the builder methods to customize behavior.
///
/// # Example
///
/// ```ignore
/// use overlay_kit::config::{OverlayConfig, Platform};
///
/// let config = OverlayConfig::default()
///     .with_platform(Platform::Ios)
///     .with_dev_mode(true);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Target platform (default: web)
    pub platform: Platform,
    /// Z-index of the first overlay on an empty stack
    pub z_index_baseline: i32,
    /// Explicit teardown delay; falls back to the platform default
    #[serde(with = "opt_millis")]
    pub teardown_delay: Option<Duration>,
    /// Delay between attach retries when closing early
    #[serde(with = "millis")]
    pub attach_retry_interval: Duration,
    /// Attach retries before a close is abandoned
    pub attach_retry_attempts: u32,
    /// Trigger cooldown for action lists
    #[serde(with = "millis")]
    pub processing_cooldown: Duration,
    /// Margin added to toast durations for duplicate suppression
    #[serde(with = "millis")]
    pub toast_suppress_margin: Duration,
    /// Toast duration when the config does not set one
    #[serde(with = "millis")]
    pub toast_default_duration: Duration,
    /// Debounce window for debounced show entry points
    #[serde(with = "millis")]
    pub show_debounce_window: Duration,
    /// Raise misuse errors (development builds)
    pub dev_mode: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            z_index_baseline: DEFAULT_Z_INDEX_BASELINE,
            teardown_delay: None,
            attach_retry_interval: ATTACH_RETRY_INTERVAL,
            attach_retry_attempts: ATTACH_RETRY_ATTEMPTS,
            processing_cooldown: PROCESSING_COOLDOWN,
            toast_suppress_margin: TOAST_SUPPRESS_MARGIN,
            toast_default_duration: Duration::from_secs(3),
            show_debounce_window: Duration::from_millis(300),
            dev_mode: cfg!(debug_assertions),
        }
    }
}

impl OverlayConfig {
    /// Create a new OverlayConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the z-index baseline.
    pub fn with_z_index_baseline(mut self, baseline: i32) -> Self {
        self.z_index_baseline = baseline;
        self
    }

    /// Override the platform teardown delay.
    pub fn with_teardown_delay(mut self, delay: Duration) -> Self {
        self.teardown_delay = Some(delay);
        self
    }

    /// Set the attach retry policy.
    pub fn with_attach_retry(mut self, interval: Duration, attempts: u32) -> Self {
        self.attach_retry_interval = interval;
        self.attach_retry_attempts = attempts;
        self
    }

    /// Set the trigger cooldown.
    pub fn with_processing_cooldown(mut self, cooldown: Duration) -> Self {
        self.processing_cooldown = cooldown;
        self
    }

    /// Set the toast suppress margin.
    pub fn with_toast_suppress_margin(mut self, margin: Duration) -> Self {
        self.toast_suppress_margin = margin;
        self
    }

    /// Set the debounce window for debounced show calls.
    pub fn with_show_debounce_window(mut self, window: Duration) -> Self {
        self.show_debounce_window = window;
        self
    }

    /// Enable or disable dev-mode misuse checks.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Effective teardown delay.
    pub fn teardown_delay(&self) -> Duration {
        self.teardown_delay
            .unwrap_or_else(|| self.platform.teardown_delay())
    }

    /// Create config from `OVERLAY_PLATFORM` and `OVERLAY_DEV`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("OVERLAY_PLATFORM") {
            match Platform::parse(&name) {
                Some(platform) => config.platform = platform,
                None => tracing::warn!("Unknown OVERLAY_PLATFORM '{}', using {:?}", name, config.platform),
            }
        }

        if let Ok(flag) = std::env::var("OVERLAY_DEV") {
            config.dev_mode = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Parse config from JSON; missing fields take defaults.
    pub fn from_json_str(json: &str) -> OverlayResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the scheduler spin or never fire.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.attach_retry_attempts > 0 && self.attach_retry_interval.is_zero() {
            return Err(OverlayError::invalid_config(
                "attach_retry_interval",
                "must be non-zero when retries are enabled",
            ));
        }
        if self.show_debounce_window.is_zero() {
            return Err(OverlayError::invalid_config(
                "show_debounce_window",
                "must be non-zero",
            ));
        }
        if self.z_index_baseline > i32::MAX - Z_INDEX_HEADROOM {
            return Err(OverlayError::invalid_config(
                "z_index_baseline",
                "must leave room for stacked overlays",
            ));
        }
        Ok(())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

mod opt_millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|ms| ms.map(Duration::from_millis))
    }
}
