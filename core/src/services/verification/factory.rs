//! Sender selection by channel

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::otp::OtpChannel;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::traits::OtpSender;

/// Registry of delivery strategies keyed by channel
#[derive(Clone, Default)]
pub struct OtpSenderFactory {
    senders: HashMap<OtpChannel, Arc<dyn OtpSender>>,
}

impl OtpSenderFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sender under its own channel, replacing any previous one
    pub fn with_sender(mut self, sender: Arc<dyn OtpSender>) -> Self {
        self.register(sender);
        self
    }

    pub fn register(&mut self, sender: Arc<dyn OtpSender>) {
        self.senders.insert(sender.channel(), sender);
    }

    /// Sender for `channel`, or `ChannelUnavailable` when none is configured
    pub fn sender_for(&self, channel: OtpChannel) -> DomainResult<Arc<dyn OtpSender>> {
        self.senders.get(&channel).cloned().ok_or_else(|| {
            DomainError::Auth(AuthError::ChannelUnavailable {
                channel: channel.to_string(),
            })
        })
    }

    pub fn supports(&self, channel: OtpChannel) -> bool {
        self.senders.contains_key(&channel)
    }

    pub fn channels(&self) -> Vec<OtpChannel> {
        let mut channels: Vec<_> = self.senders.keys().copied().collect();
        channels.sort_by_key(|c| c.as_str());
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::verification::MockOtpSender;

    #[test]
    fn test_sender_for_registered_channel() {
        let factory = OtpSenderFactory::new().with_sender(Arc::new(MockOtpSender::email()));

        assert!(factory.supports(OtpChannel::Email));
        assert_eq!(
            factory.sender_for(OtpChannel::Email).unwrap().channel(),
            OtpChannel::Email
        );
    }

    #[test]
    fn test_missing_channel_is_unavailable() {
        let factory = OtpSenderFactory::new().with_sender(Arc::new(MockOtpSender::email()));

        let result = factory.sender_for(OtpChannel::WhatsApp);
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::ChannelUnavailable { channel })) if channel == "whatsapp"
        ));
    }

    #[test]
    fn test_channels_listing() {
        let factory = OtpSenderFactory::new()
            .with_sender(Arc::new(MockOtpSender::whatsapp()))
            .with_sender(Arc::new(MockOtpSender::email()));
        assert_eq!(
            factory.channels(),
            vec![OtpChannel::Email, OtpChannel::WhatsApp]
        );
    }
}
