//! Builds the sender registry from configuration

use std::sync::Arc;

use hb_core::services::verification::MockOtpSender;
use hb_core::services::OtpSenderFactory;
use hb_shared::OtpConfig;

use super::{HttpEmailSender, WhatsAppCloudSender};
use crate::InfrastructureError;

/// Register one sender per configured channel.
///
/// Provider names: email `mock | http | disabled`, WhatsApp
/// `mock | cloud | disabled`. A disabled channel is left out, so requests
/// for it fail with `ChannelUnavailable`.
pub fn build_sender_factory(config: &OtpConfig) -> Result<OtpSenderFactory, InfrastructureError> {
    let mut factory = OtpSenderFactory::new();

    match config.email.provider.to_lowercase().as_str() {
        "mock" => factory.register(Arc::new(MockOtpSender::email())),
        "http" => factory.register(Arc::new(HttpEmailSender::new(config.email.clone())?)),
        "disabled" | "none" => {}
        other => {
            return Err(InfrastructureError::Config(format!(
                "unknown email provider: {}",
                other
            )))
        }
    }

    match config.whatsapp.provider.to_lowercase().as_str() {
        "mock" => factory.register(Arc::new(MockOtpSender::whatsapp())),
        "cloud" => factory.register(Arc::new(WhatsAppCloudSender::new(config.whatsapp.clone())?)),
        "disabled" | "none" => {}
        other => {
            return Err(InfrastructureError::Config(format!(
                "unknown whatsapp provider: {}",
                other
            )))
        }
    }

    tracing::info!(channels = ?factory.channels(), "Passcode delivery channels configured");
    Ok(factory)
}
