//! Email delivery through a transactional mail HTTP API
//!
//! Posts `{from, to, subject, text}` with a bearer key to the configured
//! endpoint and takes the message id from the `id` field of the reply.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use hb_core::domain::entities::otp::{OtpChannel, OtpPurpose};
use hb_core::services::OtpSender;
use hb_shared::config::EmailProviderConfig;
use hb_shared::validation::{is_valid_email, mask_email};

use super::http::{post_json, RetryPolicy};
use super::message;
use crate::InfrastructureError;

pub struct HttpEmailSender {
    client: Client,
    config: EmailProviderConfig,
    policy: RetryPolicy,
}

impl HttpEmailSender {
    pub fn new(config: EmailProviderConfig) -> Result<Self, InfrastructureError> {
        Self::with_policy(config, RetryPolicy::default())
    }

    pub fn with_policy(
        config: EmailProviderConfig,
        policy: RetryPolicy,
    ) -> Result<Self, InfrastructureError> {
        if config.api_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "email api_url must be set for the http provider".to_string(),
            ));
        }
        if !is_valid_email(&config.from_address) {
            return Err(InfrastructureError::Config(format!(
                "invalid email sender address: {}",
                config.from_address
            )));
        }

        info!(from = %mask_email(&config.from_address), "HTTP email sender initialized");
        Ok(Self {
            client: policy.client()?,
            config,
            policy,
        })
    }

    pub(crate) fn payload(&self, destination: &str, code: &str, purpose: OtpPurpose) -> Value {
        json!({
            "from": self.config.from_address,
            "to": [destination],
            "subject": message::subject(purpose),
            "text": message::body(purpose, code),
        })
    }
}

#[async_trait]
impl OtpSender for HttpEmailSender {
    fn channel(&self) -> OtpChannel {
        OtpChannel::Email
    }

    fn is_valid_destination(&self, destination: &str) -> bool {
        is_valid_email(destination)
    }

    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, String> {
        let payload = self.payload(destination, code, purpose);

        let reply = post_json(
            &self.client,
            &self.config.api_url,
            &self.config.api_key,
            &payload,
            self.policy,
        )
        .await
        .map_err(|e| {
            error!(destination = %mask_email(destination), error = %e, "Email delivery failed");
            e.to_string()
        })?;

        let message_id = reply
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("email-{}", Uuid::new_v4()));

        info!(
            destination = %mask_email(destination),
            purpose = purpose.as_str(),
            message_id = %message_id,
            "Passcode email sent"
        );
        Ok(message_id)
    }
}
