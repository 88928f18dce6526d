//! Redis passcode store
//!
//! One JSON document per (recipient, purpose) under `otp:{purpose}:{recipient}`,
//! expiring together with the code, and an `INCR` counter of submissions next
//! to it under the same key plus `:attempts`. Only the code hash is ever stored.

use async_trait::async_trait;

use hb_core::domain::entities::otp::{OtpCode, OtpPurpose};
use hb_core::services::OtpStore;
use hb_shared::validation::mask_recipient;

use super::redis_client::RedisClient;

const OTP_KEY_PREFIX: &str = "otp";

#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub(crate) fn format_key(recipient_key: &str, purpose: OtpPurpose) -> String {
        format!("{}:{}:{}", OTP_KEY_PREFIX, purpose.as_str(), recipient_key)
    }

    pub(crate) fn format_attempts_key(recipient_key: &str, purpose: OtpPurpose) -> String {
        format!("{}:attempts", Self::format_key(recipient_key, purpose))
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, code: OtpCode) -> Result<(), String> {
        let key = Self::format_key(&code.recipient_key, code.purpose);
        let payload = serde_json::to_string(&code).map_err(|e| e.to_string())?;
        let ttl = code.ttl_seconds().max(1) as u64;

        self.client
            .set_with_expiry(&key, &payload, ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    recipient = %mask_recipient(&code.recipient_key),
                    error = %e,
                    "Failed to store passcode"
                );
                e.to_string()
            })?;

        // A fresh code starts with a fresh attempt budget
        self.client
            .delete(&Self::format_attempts_key(&code.recipient_key, code.purpose))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn get(
        &self,
        recipient_key: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, String> {
        let key = Self::format_key(recipient_key, purpose);
        match self.client.get(&key).await.map_err(|e| e.to_string())? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| format!("Corrupt passcode entry: {}", e)),
            None => Ok(None),
        }
    }

    async fn record_attempt(&self, code: &OtpCode) -> Result<u32, String> {
        let key = Self::format_attempts_key(&code.recipient_key, code.purpose);
        let ttl = code.ttl_seconds().max(1) as u64;
        let count = self
            .client
            .increment(&key, ttl)
            .await
            .map_err(|e| e.to_string())?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn remove(&self, recipient_key: &str, purpose: OtpPurpose) -> Result<bool, String> {
        let key = Self::format_key(recipient_key, purpose);
        self.client.delete(&key).await.map_err(|e| e.to_string())
    }
}
