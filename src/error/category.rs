//! Error category classification for overlay errors.
//!
//! Overlay errors never reach the end user. The category tells the caller
//! whether the failure is a bug to fix during development, a missing
//! collaborator, or a lifecycle conflict it can wait out.

use std::fmt;

/// High-level categorization of overlay errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Programmer misuse (e.g. an empty toast title).
    /// Raised only in development builds.
    Misuse,

    /// A required collaborator was not provided at the moment of use.
    MissingDependency,

    /// The overlay is in a state that does not allow the operation yet.
    /// Retryable once the pending transition finishes.
    Lifecycle,

    /// Invalid or unparsable configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if the operation can succeed later without code changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Lifecycle)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Misuse => "misuse",
            ErrorCategory::MissingDependency => "missing_dependency",
            ErrorCategory::Lifecycle => "lifecycle",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns a developer-facing description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Misuse => "Overlay API misuse",
            ErrorCategory::MissingDependency => "Required dependency missing",
            ErrorCategory::Lifecycle => "Overlay lifecycle conflict",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns a suggested fix for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Misuse => "Fix the call site; this check only runs in dev mode.",
            ErrorCategory::MissingDependency => "Provide the missing callback when building the overlay.",
            ErrorCategory::Lifecycle => "Wait for the close animation to finish, then retry.",
            ErrorCategory::Configuration => "Check the overlay configuration values.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
