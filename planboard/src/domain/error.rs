use std::fmt;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors surfaced by the repository clients and sessions.
///
/// Every variant is scoped to the single action that produced it; none of
/// them leave previously loaded state modified.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Validation(ValidationFailure::Rejected(message.into()))
    }

    /// Whether repeating the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Field errors, when the failure came from local draft validation.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Validation(ValidationFailure::Fields(errors)) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(ValidationFailure::Fields(errors))
    }
}

/// Why a write was rejected, locally or by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Project draft failed local validation.
    Fields(ValidationErrors),
    /// Assignment rows (zero-based) missing a user or role.
    IncompleteAssignments(Vec<usize>),
    /// The batch had no assignments at all.
    EmptyAssignments,
    /// The backend refused the payload.
    Rejected(String),
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::Fields(errors) => write!(f, "{errors}"),
            ValidationFailure::IncompleteAssignments(rows) => {
                let rows = rows
                    .iter()
                    .map(|row| (row + 1).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "please fill in user and role for assignment(s) {rows}")
            }
            ValidationFailure::EmptyAssignments => write!(f, "no assignments given"),
            ValidationFailure::Rejected(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_and_server_failures_are_retryable() {
        assert!(ApiError::Network("timeout".into()).is_retryable());
        assert!(ApiError::Server {
            status: 503,
            message: "unavailable".into()
        }
        .is_retryable());
        assert!(!ApiError::not_found("project p1").is_retryable());
        assert!(!ApiError::rejected("bad payload").is_retryable());
    }

    #[test]
    fn incomplete_assignments_are_reported_one_based() {
        let err = ApiError::Validation(ValidationFailure::IncompleteAssignments(vec![0, 2]));
        assert_eq!(
            err.to_string(),
            "validation failed: please fill in user and role for assignment(s) 1, 3"
        );
    }
}
