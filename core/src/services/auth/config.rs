//! Configuration for the authentication service

use hb_shared::config::{AuthConfig, OtpConfig};

use crate::domain::entities::otp::OtpChannel;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether to allow registration of new users
    pub allow_registration: bool,
    /// Channel used when a request does not name one
    pub default_channel: OtpChannel,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
            default_channel: OtpChannel::Email,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthServiceConfig {
    pub fn from_app(auth: &AuthConfig, otp: &OtpConfig) -> Self {
        Self {
            allow_registration: auth.allow_registration,
            default_channel: otp.default_channel.parse().unwrap_or(OtpChannel::Email),
            bcrypt_cost: auth.bcrypt_cost,
        }
    }
}
