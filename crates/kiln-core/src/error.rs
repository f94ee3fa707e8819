//! Unified error handling for Kiln Core.
//!
//! [`KilnError`] wraps domain and application errors and can be tagged with
//! the [`BuildPhase`] it surfaced in.

use thiserror::Error;

use crate::application::{ApplicationError, BuildPhase};
use crate::domain::DomainError;

/// Root error type for Kiln Core operations.
#[derive(Debug, Error, Clone)]
pub enum KilnError {
    /// Errors from the domain layer (generation rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A failure tagged with the build phase it occurred in.
    #[error("{phase} phase failed: {source}")]
    Phase {
        phase: BuildPhase,
        #[source]
        source: Box<KilnError>,
    },
}

impl KilnError {
    /// Tag an error with the phase it happened in. Already-tagged errors keep
    /// their innermost phase.
    pub fn in_phase(self, phase: BuildPhase) -> Self {
        match self {
            Self::Phase { .. } => self,
            // precondition errors already carry their phase
            Self::Application(ApplicationError::MissingPrecondition { .. }) => self,
            other => Self::Phase {
                phase,
                source: Box::new(other),
            },
        }
    }

    /// The phase this error was raised in, if known.
    pub fn phase(&self) -> Option<BuildPhase> {
        match self {
            Self::Phase { phase, .. } => Some(*phase),
            Self::Application(ApplicationError::MissingPrecondition { phase, .. }) => Some(*phase),
            _ => None,
        }
    }

    /// Strip phase tags.
    pub fn root_cause(&self) -> &KilnError {
        match self {
            Self::Phase { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Phase { source, .. } => source.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Phase { source, .. } => source.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// A tool ran and reported failure.
    External,
    /// A tool could not be started.
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type KilnResult<T> = Result<T, KilnError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn phase_tag_wraps_once() {
        let err: KilnError = ApplicationError::FilesystemError {
            path: PathBuf::from("www"),
            reason: "denied".into(),
        }
        .into();
        let tagged = err.in_phase(BuildPhase::Reset).in_phase(BuildPhase::Copy);
        assert_eq!(tagged.phase(), Some(BuildPhase::Reset));
        assert_eq!(tagged.to_string(), "reset phase failed: Filesystem error at www: denied");
        assert_eq!(tagged.category(), ErrorCategory::Internal);
    }

    #[test]
    fn precondition_keeps_its_own_phase() {
        let err: KilnError = ApplicationError::MissingPrecondition {
            phase: BuildPhase::Copy,
            what: "views directory",
            path: PathBuf::from("dev/views"),
        }
        .into();
        let tagged = err.in_phase(BuildPhase::Copy);
        assert!(matches!(tagged, KilnError::Application(_)));
        assert_eq!(tagged.phase(), Some(BuildPhase::Copy));
    }

    #[test]
    fn domain_errors_keep_suggestions_through_phase() {
        let err: KilnError = DomainError::HandlerCollision {
            handler: "load_a_b".into(),
            first: "a-b".into(),
            second: "a_b".into(),
        }
        .into();
        let tagged = err.in_phase(BuildPhase::Routes);
        assert_eq!(tagged.category(), ErrorCategory::Validation);
        assert!(!tagged.suggestions().is_empty());
        assert!(matches!(tagged.root_cause(), KilnError::Domain(_)));
    }
}
