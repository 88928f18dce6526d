//! Maps domain errors onto HTTP responses
//!
//! Every failure leaves the API as an `ErrorResponse` body with a stable
//! machine-readable `error` code.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use hb_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use hb_shared::ErrorResponse;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use validator::ValidationErrors;

/// Error type returned by every handler
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// The request itself could not be understood
    BadRequest {
        code: &'static str,
        message: String,
        details: Option<HashMap<String, Value>>,
    },
}

impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
            details: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain(error) => write!(f, "{}", error),
            ApiError::BadRequest { message, .. } => f.write_str(message),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        ApiError::BadRequest {
            code: "validation_error",
            message: "Invalid request data".to_string(),
            details: Some(details),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_status(error),
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);

        let body = match self {
            ApiError::Domain(error) => {
                if status.is_server_error() {
                    log::error!("Request failed: {:?}", error);
                } else {
                    log::debug!("Request rejected: {}", error);
                }
                if let DomainError::Auth(AuthError::ResendCooldown { seconds }) = error {
                    builder.insert_header((header::RETRY_AFTER, seconds.to_string()));
                }
                domain_body(error)
            }
            ApiError::BadRequest {
                code,
                message,
                details,
            } => {
                let response = ErrorResponse::new(code.to_string(), message.clone());
                match details {
                    Some(details) => response.with_details(details.clone()),
                    None => response,
                }
            }
        };

        builder.json(body)
    }
}

/// HTTP status for a domain error
pub fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::BusinessRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::PreconditionFailed { .. } => StatusCode::PRECONDITION_FAILED,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::EmailNotVerified | AuthError::InsufficientPermissions => {
                StatusCode::FORBIDDEN
            }
            AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AuthError::InvalidPhoneFormat { .. }
            | AuthError::InvalidVerificationCode { .. }
            | AuthError::VerificationCodeExpired => StatusCode::BAD_REQUEST,
            AuthError::MaxAttemptsExceeded | AuthError::ResendCooldown { .. } => {
                StatusCode::TOO_MANY_REQUESTS
            }
            AuthError::ChannelUnavailable { .. } | AuthError::DeliveryFailure => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    }
}

/// Error code, message and details; internal details never leave the server
fn domain_body(error: &DomainError) -> ErrorResponse {
    let (code, message) = match error {
        DomainError::Validation { message } => ("validation_error", message.clone()),
        DomainError::BusinessRule { message } => ("business_rule_violation", message.clone()),
        DomainError::NotFound { resource } => ("not_found", format!("{} not found", resource)),
        DomainError::Conflict { message } => ("conflict", message.clone()),
        DomainError::PreconditionFailed { .. } => (
            "precondition_failed",
            "The resource was modified by another request".to_string(),
        ),
        DomainError::Unauthorized => ("unauthorized", "Authentication required".to_string()),
        DomainError::Forbidden => (
            "forbidden",
            "You are not allowed to perform this action".to_string(),
        ),
        DomainError::Internal { .. } => {
            ("internal_error", "An internal error occurred".to_string())
        }
        DomainError::Auth(auth) => (auth.code(), auth.to_string()),
        DomainError::Token(token) => (token.code(), token.to_string()),
        DomainError::ValidationErr(validation) => (validation.code(), validation.to_string()),
    };

    let response = ErrorResponse::new(code.to_string(), message);
    let mut details = HashMap::new();
    match error {
        DomainError::PreconditionFailed { actual, .. } => {
            details.insert("current_version".to_string(), json!(actual));
        }
        DomainError::Auth(AuthError::ResendCooldown { seconds }) => {
            details.insert("retry_after".to_string(), json!(seconds));
        }
        DomainError::Auth(AuthError::InvalidVerificationCode { remaining_attempts }) => {
            details.insert("remaining_attempts".to_string(), json!(remaining_attempts));
        }
        DomainError::ValidationErr(ValidationError::RequiredField { field })
        | DomainError::ValidationErr(ValidationError::InvalidFormat { field }) => {
            details.insert("field".to_string(), json!(field));
        }
        _ => {}
    }

    if details.is_empty() {
        response
    } else {
        response.with_details(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            domain_status(&DomainError::not_found("Hotel")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_status(&DomainError::PreconditionFailed {
                expected: 1,
                actual: 2
            }),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            domain_status(&AuthError::EmailNotVerified.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            domain_status(&AuthError::ResendCooldown { seconds: 30 }.into()),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            domain_status(&TokenError::TokenRevoked.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            domain_status(&DomainError::business_rule("closed")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[actix_web::test]
    async fn test_internal_message_is_hidden() {
        let error = ApiError::from(DomainError::internal("connection pool exhausted"));
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal_error");
        assert!(!json["message"].as_str().unwrap().contains("pool"));
    }

    #[actix_web::test]
    async fn test_cooldown_sets_retry_after() {
        let error = ApiError::from(DomainError::from(AuthError::ResendCooldown { seconds: 42 }));
        let response = error.error_response();
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "42"
        );

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["details"]["retry_after"], 42);
    }
}
