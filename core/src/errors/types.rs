//! Domain-specific error types for authentication, tokens and input validation
//!
//! Messages are English only; the presentation layer maps each variant to an
//! error code and HTTP status.

use thiserror::Error;

/// Authentication and account-verification errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address has not been verified")]
    EmailNotVerified,

    #[error("Email address is already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Invalid verification code ({remaining_attempts} attempts remaining)")]
    InvalidVerificationCode { remaining_attempts: u32 },

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Maximum attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Please wait {seconds} seconds before requesting a new code")]
    ResendCooldown { seconds: i64 },

    #[error("Delivery channel unavailable: {channel}")]
    ChannelUnavailable { channel: String },

    #[error("Failed to deliver verification code")]
    DeliveryFailure,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid length: {field} (max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid date range: {reason}")]
    InvalidDateRange { reason: String },

    #[error("Password does not meet requirements: {reason}")]
    WeakPassword { reason: String },
}

impl AuthError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::EmailNotVerified => "email_not_verified",
            AuthError::EmailAlreadyRegistered => "email_already_registered",
            AuthError::InvalidPhoneFormat { .. } => "invalid_phone_format",
            AuthError::InvalidVerificationCode { .. } => "invalid_verification_code",
            AuthError::VerificationCodeExpired => "verification_code_expired",
            AuthError::MaxAttemptsExceeded => "max_attempts_exceeded",
            AuthError::ResendCooldown { .. } => "resend_cooldown",
            AuthError::ChannelUnavailable { .. } => "channel_unavailable",
            AuthError::DeliveryFailure => "delivery_failure",
            AuthError::UserNotFound => "user_not_found",
            AuthError::InsufficientPermissions => "insufficient_permissions",
        }
    }
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "token_expired",
            TokenError::InvalidTokenFormat => "invalid_token_format",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::TokenNotYetValid => "token_not_yet_valid",
            TokenError::InvalidClaims => "invalid_claims",
            TokenError::TokenRevoked => "token_revoked",
            TokenError::RefreshTokenExpired => "refresh_token_expired",
            TokenError::InvalidRefreshToken => "invalid_refresh_token",
            TokenError::TokenGenerationFailed => "token_generation_failed",
        }
    }
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "required_field",
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::OutOfRange { .. } => "out_of_range",
            ValidationError::InvalidLength { .. } => "invalid_length",
            ValidationError::InvalidEmail => "invalid_email",
            ValidationError::InvalidDateRange { .. } => "invalid_date_range",
            ValidationError::WeakPassword { .. } => "weak_password",
        }
    }
}
