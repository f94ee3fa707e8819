//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// The build phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPhase {
    Reset,
    Copy,
    Stylesheets,
    Favicon,
    Head,
    Routes,
}

impl BuildPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Copy => "copy",
            Self::Stylesheets => "stylesheets",
            Self::Favicon => "favicon",
            Self::Head => "head",
            Self::Routes => "routes",
        }
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A required input is absent.
    #[error("{phase} phase: missing {what} at {path}")]
    MissingPrecondition {
        phase: BuildPhase,
        what: &'static str,
        path: PathBuf,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external tool ran and exited unsuccessfully.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// An external tool could not be started.
    #[error("{tool} could not be started: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    /// Requested template does not exist in the store.
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPrecondition { what, path, .. } => vec![
                format!("Create the {} at {}", what, path.display()),
                "Check --source points at the project root (the folder holding dev/ and res/)"
                    .into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ToolFailed { tool, .. } => vec![
                format!("Run {} by hand on the same input to see the full diagnostics", tool),
                "Fix the source file it rejected and rebuild".into(),
            ],
            Self::ToolUnavailable { tool, .. } => vec![
                format!("Install {} or put it on PATH", tool),
                "Or point [tools] in the config file at the right program".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("Add '{}' to dev/templates/ or reinstall kiln", name),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPrecondition { .. } | Self::TemplateNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::ToolFailed { .. } => ErrorCategory::External,
            Self::ToolUnavailable { .. } => ErrorCategory::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_precondition_names_phase_and_path() {
        let err = ApplicationError::MissingPrecondition {
            phase: BuildPhase::Favicon,
            what: "favicon source",
            path: PathBuf::from("res/favicon.svg"),
        };
        assert_eq!(
            err.to_string(),
            "favicon phase: missing favicon source at res/favicon.svg"
        );
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn tool_failure_reports_status_and_stderr() {
        let err = ApplicationError::ToolFailed {
            tool: "sass".into(),
            status: "exit status: 65".into(),
            stderr: "Error: expected \"}\".".into(),
        };
        assert!(err.to_string().starts_with("sass exited with exit status: 65"));
        assert_eq!(err.category(), ErrorCategory::External);
    }
}
