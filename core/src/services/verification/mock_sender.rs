//! Sender that records codes instead of delivering them.
//!
//! Backs the "mock" provider in development and the tests.

use async_trait::async_trait;
use hb_shared::utils::validation::{is_valid_e164_phone, is_valid_email, mask_recipient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpChannel, OtpPurpose};

use super::traits::OtpSender;

/// A code captured by [`MockOtpSender`]
#[derive(Debug, Clone)]
pub struct SentCode {
    pub destination: String,
    pub code: String,
    pub purpose: OtpPurpose,
    pub message_id: String,
}

#[derive(Clone)]
pub struct MockOtpSender {
    channel: OtpChannel,
    sent: Arc<RwLock<Vec<SentCode>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockOtpSender {
    pub fn new(channel: OtpChannel) -> Self {
        Self {
            channel,
            sent: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn email() -> Self {
        Self::new(OtpChannel::Email)
    }

    pub fn whatsapp() -> Self {
        Self::new(OtpChannel::WhatsApp)
    }

    /// Make subsequent sends fail
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Most recent code sent to `destination`
    pub async fn last_code_for(&self, destination: &str) -> Option<String> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|s| s.destination == destination)
            .map(|s| s.code.clone())
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn sent(&self) -> Vec<SentCode> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl OtpSender for MockOtpSender {
    fn channel(&self) -> OtpChannel {
        self.channel
    }

    fn is_valid_destination(&self, destination: &str) -> bool {
        match self.channel {
            OtpChannel::Email => is_valid_email(destination),
            OtpChannel::WhatsApp => is_valid_e164_phone(destination),
        }
    }

    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("mock delivery failure".to_string());
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        tracing::info!(
            channel = %self.channel,
            destination = %mask_recipient(destination),
            purpose = purpose.as_str(),
            code = code,
            "[MOCK] Passcode not delivered, recorded instead"
        );

        self.sent.write().await.push(SentCode {
            destination: destination.to_string(),
            code: code.to_string(),
            purpose,
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }
}
