//! Configuration for the verification service

use hb_shared::config::OtpConfig;

use crate::domain::entities::otp::CODE_LENGTH;

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Digits per code
    pub code_length: usize,
    /// Seconds before a code expires
    pub code_ttl_seconds: i64,
    /// Wrong guesses allowed per code
    pub max_attempts: u32,
    /// Minimum seconds between code requests
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_ttl_seconds: 600,
            max_attempts: 5,
            resend_cooldown_seconds: 60,
        }
    }
}

impl From<&OtpConfig> for VerificationConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length.max(4),
            code_ttl_seconds: config.code_ttl_seconds,
            max_attempts: config.max_attempts.max(1),
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
