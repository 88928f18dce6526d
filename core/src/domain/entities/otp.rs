//! One-time passcodes used for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default number of digits in a code
pub const CODE_LENGTH: usize = 6;

/// Why a code was issued; codes for different purposes never satisfy each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    EmailVerification,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "email_verification",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

/// Delivery channel for a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpChannel {
    Email,
    WhatsApp,
}

impl OtpChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpChannel::Email => "email",
            OtpChannel::WhatsApp => "whatsapp",
        }
    }
}

impl std::fmt::Display for OtpChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(OtpChannel::Email),
            "whatsapp" => Ok(OtpChannel::WhatsApp),
            other => Err(format!("Unknown channel: {}", other)),
        }
    }
}

/// A stored passcode. Only the SHA-256 hash of the code is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Account the code belongs to (normalized email)
    pub recipient_key: String,
    pub purpose: OtpPurpose,
    pub channel: OtpChannel,
    pub code_hash: String,
    pub max_attempts: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    pub fn new(
        recipient_key: String,
        purpose: OtpPurpose,
        channel: OtpChannel,
        code_hash: String,
        ttl_seconds: i64,
        max_attempts: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            recipient_key,
            purpose,
            channel,
            code_hash,
            max_attempts,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the `attempt`-th submission (1-based) may still be checked
    pub fn allows_attempt(&self, attempt: u32) -> bool {
        attempt <= self.max_attempts
    }

    /// Submissions left once `attempts` have been made
    pub fn remaining_after(&self, attempts: u32) -> u32 {
        self.max_attempts.saturating_sub(attempts)
    }

    /// Seconds left until another code may be issued, if still cooling down
    pub fn cooldown_remaining(&self, cooldown_seconds: i64) -> Option<i64> {
        let elapsed = (Utc::now() - self.created_at).num_seconds();
        let remaining = cooldown_seconds - elapsed;
        (remaining > 0).then_some(remaining)
    }

    /// Seconds until expiry, never negative
    pub fn ttl_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
