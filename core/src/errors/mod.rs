//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Version mismatch: expected {expected}, current {actual}")]
    PreconditionFailed { expected: i64, actual: i64 },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        DomainError::BusinessRule {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridged_errors_are_transparent() {
        let error: DomainError = TokenError::TokenRevoked.into();
        assert_eq!(error.to_string(), "Token revoked");

        let error: DomainError = ValidationError::InvalidEmail.into();
        assert!(matches!(error, DomainError::ValidationErr(_)));
    }

    #[test]
    fn test_precondition_message() {
        let error = DomainError::PreconditionFailed {
            expected: 2,
            actual: 3,
        };
        assert_eq!(error.to_string(), "Version mismatch: expected 2, current 3");
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(
            DomainError::not_found("Hotel"),
            DomainError::NotFound { resource } if resource == "Hotel"
        ));
        assert!(matches!(
            DomainError::conflict("taken"),
            DomainError::Conflict { .. }
        ));
    }
}
