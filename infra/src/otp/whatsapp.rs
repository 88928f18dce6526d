//! WhatsApp delivery through the Cloud API
//!
//! `POST {api_url}/{phone_number_id}/messages` with a text message; the
//! reply carries the message id under `messages[0].id`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info};

use hb_core::domain::entities::otp::{OtpChannel, OtpPurpose};
use hb_core::services::OtpSender;
use hb_shared::config::WhatsAppProviderConfig;
use hb_shared::validation::{is_valid_e164_phone, mask_phone};

use super::http::{post_json, RetryPolicy};
use super::message;
use crate::InfrastructureError;

pub struct WhatsAppCloudSender {
    client: Client,
    config: WhatsAppProviderConfig,
    policy: RetryPolicy,
    messages_url: String,
}

impl WhatsAppCloudSender {
    pub fn new(config: WhatsAppProviderConfig) -> Result<Self, InfrastructureError> {
        Self::with_policy(config, RetryPolicy::default())
    }

    pub fn with_policy(
        config: WhatsAppProviderConfig,
        policy: RetryPolicy,
    ) -> Result<Self, InfrastructureError> {
        if config.access_token.is_empty() || config.phone_number_id.is_empty() {
            return Err(InfrastructureError::Config(
                "whatsapp access_token and phone_number_id must be set for the cloud provider"
                    .to_string(),
            ));
        }

        let messages_url = format!(
            "{}/{}/messages",
            config.api_url.trim_end_matches('/'),
            config.phone_number_id
        );

        info!("WhatsApp Cloud sender initialized");
        Ok(Self {
            client: policy.client()?,
            config,
            policy,
            messages_url,
        })
    }

    pub(crate) fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// The Cloud API takes the number without the leading `+`
    pub(crate) fn payload(destination: &str, code: &str, purpose: OtpPurpose) -> Value {
        json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": destination.trim_start_matches('+'),
            "type": "text",
            "text": {
                "preview_url": false,
                "body": message::body(purpose, code),
            },
        })
    }
}

#[async_trait]
impl OtpSender for WhatsAppCloudSender {
    fn channel(&self) -> OtpChannel {
        OtpChannel::WhatsApp
    }

    fn is_valid_destination(&self, destination: &str) -> bool {
        is_valid_e164_phone(destination)
    }

    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, String> {
        let payload = Self::payload(destination, code, purpose);

        let reply = post_json(
            &self.client,
            &self.messages_url,
            &self.config.access_token,
            &payload,
            self.policy,
        )
        .await
        .map_err(|e| {
            error!(destination = %mask_phone(destination), error = %e, "WhatsApp delivery failed");
            e.to_string()
        })?;

        let message_id = reply
            .pointer("/messages/0/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| "WhatsApp reply carried no message id".to_string())?;

        info!(
            destination = %mask_phone(destination),
            purpose = purpose.as_str(),
            message_id = %message_id,
            "Passcode WhatsApp message sent"
        );
        Ok(message_id)
    }
}
