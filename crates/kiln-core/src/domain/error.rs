// ============================================================================
// domain/error.rs - GENERATION RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be wrapped per build phase)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Route Errors
    // ========================================================================
    /// Two distinct view paths normalize to the same handler identifier.
    #[error("routes '{first}' and '{second}' both map to handler '{handler}'")]
    HandlerCollision {
        handler: String,
        first: String,
        second: String,
    },

    #[error("view path '{path}' cannot be routed: {reason}")]
    InvalidViewPath { path: String, reason: String },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("template '{name}' is empty")]
    EmptyTemplate { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::HandlerCollision { first, second, .. } => vec![
                format!("Rename either '{}' or '{}'", first, second),
                "Hyphens and path separators are folded into underscores".into(),
            ],
            Self::InvalidViewPath { path, .. } => vec![
                format!("Check the file name of view '{}'", path),
                "Prefix internal partials with '~' to exclude them from routing".into(),
            ],
            Self::EmptyTemplate { name } => vec![format!("Template '{}' has no content", name)],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HandlerCollision { .. } | Self::InvalidViewPath { .. } => {
                ErrorCategory::Validation
            }
            Self::EmptyTemplate { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
