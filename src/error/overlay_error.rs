//! The overlay error type.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::models::OverlayId;

/// Errors raised by the overlay coordination layer.
///
/// Transient races (closing before the surface attached) are not errors;
/// they are absorbed by the bounded retry in the teardown scheduler.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A toast was shown with an empty title while dev mode is on.
    #[error("toast title must not be empty")]
    EmptyToastTitle,

    /// A feature was used without the collaborator it needs.
    #[error("missing required dependency: {dependency}")]
    MissingDependency { dependency: String },

    /// A reopen was requested while the previous close is still animating.
    #[error("overlay {id} is still tearing down")]
    TeardownPending { id: OverlayId },

    /// A configuration value is out of range.
    #[error("invalid config field '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    /// Configuration JSON could not be parsed.
    #[error("failed to parse overlay config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl OverlayError {
    /// Create a missing-dependency error.
    pub fn missing(dependency: impl Into<String>) -> Self {
        OverlayError::MissingDependency {
            dependency: dependency.into(),
        }
    }

    /// Create an invalid-config error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        OverlayError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OverlayError::EmptyToastTitle => ErrorCategory::Misuse,
            OverlayError::MissingDependency { .. } => ErrorCategory::MissingDependency,
            OverlayError::TeardownPending { .. } => ErrorCategory::Lifecycle,
            OverlayError::InvalidConfig { .. } | OverlayError::ConfigParse(_) => {
                ErrorCategory::Configuration
            }
        }
    }

    /// Whether this error is only ever raised with dev mode enabled.
    pub fn is_dev_only(&self) -> bool {
        matches!(self, OverlayError::EmptyToastTitle)
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            OverlayError::EmptyToastTitle => "E_OVL_TOAST_TITLE",
            OverlayError::MissingDependency { .. } => "E_OVL_MISSING_DEP",
            OverlayError::TeardownPending { .. } => "E_OVL_TEARDOWN",
            OverlayError::InvalidConfig { .. } => "E_OVL_CONFIG",
            OverlayError::ConfigParse(_) => "E_OVL_CONFIG_PARSE",
        }
    }

    /// Get a developer-facing message with a fix hint.
    pub fn user_message(&self) -> String {
        format!("{}. {}", self, self.category().recovery_hint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toast_title_is_dev_only_misuse() {
        let err = OverlayError::EmptyToastTitle;
        assert!(err.is_dev_only());
        assert_eq!(err.category(), ErrorCategory::Misuse);
        assert_eq!(err.error_code(), "E_OVL_TOAST_TITLE");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_missing_dependency_names_dependency() {
        let err = OverlayError::missing("on_scan");
        assert_eq!(err.category(), ErrorCategory::MissingDependency);
        assert!(err.to_string().contains("on_scan"));
        assert!(err.user_message().contains("Provide the missing callback"));
    }

    #[test]
    fn test_teardown_pending_is_retryable() {
        let err = OverlayError::TeardownPending { id: OverlayId(7) };
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "overlay #7 is still tearing down");
    }

    #[test]
    fn test_json_error_converts_to_config_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: OverlayError = json_err.into();
        assert!(matches!(err, OverlayError::ConfigParse(_)));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
