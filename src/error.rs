//! Crate-level error type.

use thiserror::Error;

use crate::cp::EngineError;
use crate::validation::ValidationError;

/// Errors returned by the scheduling pipeline.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Jobs or machine groups were empty; the engine was not invoked.
    #[error("nothing to solve: {0}")]
    NothingToSolve(String),

    /// The input failed validation.
    #[error("invalid input: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    /// No assignment satisfies all constraints.
    #[error("no feasible schedule exists")]
    Infeasible,

    /// The engine failed or stopped without a solution.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A configuration or request document could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ScheduleError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_validation_message_joins_errors() {
        let err = ScheduleError::from(vec![
            ValidationError {
                kind: ValidationErrorKind::DuplicateId,
                message: "Duplicate job ID: J1".into(),
            },
            ValidationError {
                kind: ValidationErrorKind::EmptyJob,
                message: "Job 'J2' has no operations".into(),
            },
        ]);
        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate job ID: J1; Job 'J2' has no operations"
        );
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err = ScheduleError::from(EngineError::Internal("boom".into()));
        assert_eq!(err.to_string(), "solver failure: boom");
        assert!(err.validation_errors().is_empty());
    }
}
