//! Error types for moniker resolution and native binding.
//!
//! The set of failures is closed: every error carries the moniker, locator or
//! method name involved so callers can tell whether to fix registration data,
//! install a missing native dependency, or treat it as a programming defect.

use thiserror::Error;

/// Main error type for the interop layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteropError {
    // Caller errors
    #[error("Value cannot be null. (Parameter 'moniker')")]
    NullMoniker,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Resolution errors
    #[error("The specified moniker '{moniker}' is not valid.")]
    InvalidMoniker { moniker: String },

    #[error("Platform not supported.")]
    PlatformNotSupported,

    // Loader errors
    #[error("Cannot load module '{locator}'.")]
    ModuleCouldNotBeLoaded { locator: String },

    #[error("Cannot find method '{method}'.")]
    MethodMissing { method: String },

    #[error("Cannot load method '{method}'.")]
    MethodCouldNotBeLoaded { method: String },
}

/// Result type alias for interop operations.
pub type Result<T> = std::result::Result<T, InteropError>;

/// Discriminant of an [`InteropError`], without the attached name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    NullMoniker,
    InvalidArgument,
    InvalidMoniker,
    PlatformNotSupported,
    ModuleCouldNotBeLoaded,
    MethodMissing,
    MethodCouldNotBeLoaded,
}

impl InteropError {
    /// Create an invalid-argument error for the named parameter.
    pub fn invalid_argument(parameter: impl Into<String>) -> Self {
        InteropError::InvalidArgument(parameter.into())
    }

    /// Create an invalid-moniker error.
    pub fn invalid_moniker(moniker: impl Into<String>) -> Self {
        InteropError::InvalidMoniker {
            moniker: moniker.into(),
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            InteropError::NullMoniker => FailureReason::NullMoniker,
            InteropError::InvalidArgument(_) => FailureReason::InvalidArgument,
            InteropError::InvalidMoniker { .. } => FailureReason::InvalidMoniker,
            InteropError::PlatformNotSupported => FailureReason::PlatformNotSupported,
            InteropError::ModuleCouldNotBeLoaded { .. } => FailureReason::ModuleCouldNotBeLoaded,
            InteropError::MethodMissing { .. } => FailureReason::MethodMissing,
            InteropError::MethodCouldNotBeLoaded { .. } => FailureReason::MethodCouldNotBeLoaded,
        }
    }

    /// The moniker, parameter, locator or method name this error refers to.
    pub fn name(&self) -> Option<&str> {
        match self {
            InteropError::NullMoniker | InteropError::PlatformNotSupported => None,
            InteropError::InvalidArgument(name) => Some(name.as_str()),
            InteropError::InvalidMoniker { moniker } => Some(moniker.as_str()),
            InteropError::ModuleCouldNotBeLoaded { locator } => Some(locator.as_str()),
            InteropError::MethodMissing { method }
            | InteropError::MethodCouldNotBeLoaded { method } => Some(method.as_str()),
        }
    }

    /// Check if this error is a bug in the calling code rather than an
    /// environment problem.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            InteropError::NullMoniker | InteropError::InvalidArgument(_)
        )
    }

    /// Check if the same call can succeed once the caller registers the
    /// moniker or installs the missing library.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InteropError::InvalidMoniker { .. } | InteropError::ModuleCouldNotBeLoaded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            InteropError::PlatformNotSupported.to_string(),
            "Platform not supported."
        );
        assert_eq!(
            InteropError::MethodMissing {
                method: "Some Method 1...".into()
            }
            .to_string(),
            "Cannot find method 'Some Method 1...'."
        );
        assert_eq!(
            InteropError::ModuleCouldNotBeLoaded {
                locator: "Some Module 2...".into()
            }
            .to_string(),
            "Cannot load module 'Some Module 2...'."
        );
        assert_eq!(
            InteropError::MethodCouldNotBeLoaded {
                method: "Some Method 2...".into()
            }
            .to_string(),
            "Cannot load method 'Some Method 2...'."
        );
        assert_eq!(
            InteropError::invalid_moniker("").to_string(),
            "The specified moniker '' is not valid."
        );
        assert_eq!(
            InteropError::NullMoniker.to_string(),
            "Value cannot be null. (Parameter 'moniker')"
        );
    }

    #[test]
    fn test_reason_and_name() {
        let err = InteropError::MethodMissing {
            method: "Method2".into(),
        };
        assert_eq!(err.reason(), FailureReason::MethodMissing);
        assert_eq!(err.name(), Some("Method2"));

        assert_eq!(
            InteropError::PlatformNotSupported.reason(),
            FailureReason::PlatformNotSupported
        );
        assert_eq!(InteropError::PlatformNotSupported.name(), None);
        assert_eq!(InteropError::invalid_argument("method").name(), Some("method"));
    }

    #[test]
    fn test_error_classification() {
        assert!(InteropError::NullMoniker.is_caller_error());
        assert!(InteropError::invalid_argument("method").is_caller_error());
        assert!(!InteropError::invalid_moniker("Cool").is_caller_error());

        assert!(InteropError::invalid_moniker("Cool").is_retryable());
        assert!(InteropError::ModuleCouldNotBeLoaded {
            locator: "Cool_x64.dll".into()
        }
        .is_retryable());
        assert!(!InteropError::PlatformNotSupported.is_retryable());
        assert!(!InteropError::MethodMissing {
            method: "Method2".into()
        }
        .is_retryable());
    }
}
