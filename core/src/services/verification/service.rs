//! Main verification service implementation

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use hb_shared::utils::validation::mask_recipient;
use rand::{rngs::OsRng, Rng};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::otp::{OtpChannel, OtpCode, OtpPurpose};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

use super::config::VerificationConfig;
use super::factory::OtpSenderFactory;
use super::traits::OtpStore;
use super::types::SendCodeResult;

/// Issues and checks one-time passcodes
pub struct VerificationService {
    store: Arc<dyn OtpStore>,
    senders: OtpSenderFactory,
    config: VerificationConfig,
}

impl VerificationService {
    pub fn new(
        store: Arc<dyn OtpStore>,
        senders: OtpSenderFactory,
        config: VerificationConfig,
    ) -> Self {
        Self {
            store,
            senders,
            config,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    pub fn supports(&self, channel: OtpChannel) -> bool {
        self.senders.supports(channel)
    }

    /// Send a fresh code for `purpose` to `destination`.
    ///
    /// `recipient_key` identifies the account (normalized email) and is the
    /// storage key, so the same code can be delivered by email or WhatsApp.
    /// A new code replaces the previous one, but only after the cooldown.
    pub async fn send_code(
        &self,
        recipient_key: &str,
        destination: &str,
        purpose: OtpPurpose,
        channel: OtpChannel,
    ) -> DomainResult<SendCodeResult> {
        let sender = self.senders.sender_for(channel)?;

        if !sender.is_valid_destination(destination) {
            return Err(match channel {
                OtpChannel::Email => DomainError::ValidationErr(ValidationError::InvalidEmail),
                OtpChannel::WhatsApp => DomainError::Auth(AuthError::InvalidPhoneFormat {
                    phone: mask_recipient(destination),
                }),
            });
        }

        if let Some(existing) = self.load(recipient_key, purpose).await? {
            if !existing.is_expired() {
                if let Some(seconds) =
                    existing.cooldown_remaining(self.config.resend_cooldown_seconds)
                {
                    tracing::warn!(
                        recipient = %mask_recipient(recipient_key),
                        purpose = purpose.as_str(),
                        cooldown_remaining = seconds,
                        event = "otp_cooldown",
                        "Passcode requested during cooldown"
                    );
                    return Err(DomainError::Auth(AuthError::ResendCooldown { seconds }));
                }
            }
        }

        let code = generate_code(self.config.code_length);
        let otp = OtpCode::new(
            recipient_key.to_string(),
            purpose,
            channel,
            hash_code(&code),
            self.config.code_ttl_seconds,
            self.config.max_attempts,
        );
        let expires_at = otp.expires_at;
        let created_at = otp.created_at;

        self.store.put(otp).await.map_err(|e| {
            tracing::error!(
                recipient = %mask_recipient(recipient_key),
                error = %e,
                event = "otp_storage_failed",
                "Failed to store passcode"
            );
            DomainError::internal(format!("Failed to store verification code: {}", e))
        })?;

        let message_id = match sender.send_code(destination, &code, purpose).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    channel = %channel,
                    destination = %mask_recipient(destination),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver passcode"
                );
                // An undelivered code must not hold the cooldown
                if let Err(e) = self.store.remove(recipient_key, purpose).await {
                    tracing::warn!(error = %e, "Failed to discard undelivered passcode");
                }
                return Err(DomainError::Auth(AuthError::DeliveryFailure));
            }
        };

        tracing::info!(
            channel = %channel,
            destination = %mask_recipient(destination),
            purpose = purpose.as_str(),
            event = "otp_sent",
            "Passcode sent"
        );

        Ok(SendCodeResult {
            channel,
            masked_destination: mask_recipient(destination),
            message_id,
            expires_at,
            next_resend_at: created_at + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Check a submitted code. A match consumes it; every submission burns an
    /// attempt, counted before the comparison.
    pub async fn verify_code(
        &self,
        recipient_key: &str,
        purpose: OtpPurpose,
        code: &str,
    ) -> DomainResult<()> {
        let stored = self
            .load(recipient_key, purpose)
            .await?
            .ok_or(DomainError::Auth(AuthError::VerificationCodeExpired))?;

        if stored.is_expired() {
            self.discard(recipient_key, purpose).await;
            return Err(DomainError::Auth(AuthError::VerificationCodeExpired));
        }

        let attempt = self
            .store
            .record_attempt(&stored)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to count attempt: {}", e)))?;

        if !stored.allows_attempt(attempt) {
            tracing::warn!(
                recipient = %mask_recipient(recipient_key),
                purpose = purpose.as_str(),
                attempt,
                event = "otp_attempts_exhausted",
                "Passcode submitted after the attempt limit"
            );
            self.discard(recipient_key, purpose).await;
            return Err(DomainError::Auth(AuthError::MaxAttemptsExceeded));
        }

        let submitted = hash_code(code.trim());
        if constant_time_eq(submitted.as_bytes(), stored.code_hash.as_bytes()) {
            // Single use: only the submission that removes the code wins
            let consumed = self.store.remove(recipient_key, purpose).await.map_err(|e| {
                DomainError::internal(format!("Failed to consume verification code: {}", e))
            })?;
            if !consumed {
                return Err(DomainError::Auth(AuthError::VerificationCodeExpired));
            }
            tracing::info!(
                recipient = %mask_recipient(recipient_key),
                purpose = purpose.as_str(),
                event = "otp_verified",
                "Passcode verified"
            );
            return Ok(());
        }

        tracing::warn!(
            recipient = %mask_recipient(recipient_key),
            purpose = purpose.as_str(),
            attempts = attempt,
            event = "otp_mismatch",
            "Wrong passcode submitted"
        );

        let remaining_attempts = stored.remaining_after(attempt);
        if remaining_attempts == 0 {
            self.discard(recipient_key, purpose).await;
            return Err(DomainError::Auth(AuthError::MaxAttemptsExceeded));
        }

        Err(DomainError::Auth(AuthError::InvalidVerificationCode {
            remaining_attempts,
        }))
    }

    async fn load(&self, recipient_key: &str, purpose: OtpPurpose) -> DomainResult<Option<OtpCode>> {
        self.store
            .get(recipient_key, purpose)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to read verification code: {}", e)))
    }

    async fn discard(&self, recipient_key: &str, purpose: OtpPurpose) {
        if let Err(e) = self.store.remove(recipient_key, purpose).await {
            tracing::warn!(
                recipient = %mask_recipient(recipient_key),
                error = %e,
                "Failed to remove passcode"
            );
        }
    }
}

/// Uniform random digits from the OS CSPRNG
fn generate_code(length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
        .collect()
}

fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..50 {
            let code = generate_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_code("123456");
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, hash_code("123457"));
    }
}
