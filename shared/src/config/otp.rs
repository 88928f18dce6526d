//! One-time passcode configuration

use serde::{Deserialize, Serialize};

/// Email delivery provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailProviderConfig {
    /// Provider name: "mock" logs codes, "http" posts to `api_url`
    pub provider: String,

    /// Transactional mail API endpoint
    pub api_url: String,

    /// Bearer key for the mail API
    pub api_key: String,

    /// Sender address
    pub from_address: String,
}

impl Default for EmailProviderConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@stayhub.local"),
        }
    }
}

/// WhatsApp Cloud API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WhatsAppProviderConfig {
    /// Provider name: "mock" or "cloud"
    pub provider: String,

    /// Graph API base URL
    pub api_url: String,

    /// Long-lived access token
    pub access_token: String,

    /// Sending phone number id
    pub phone_number_id: String,
}

impl Default for WhatsAppProviderConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::from("https://graph.facebook.com/v19.0"),
            access_token: String::new(),
            phone_number_id: String::new(),
        }
    }
}

/// Passcode policy and delivery channels
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in a code
    pub code_length: usize,

    /// Code lifetime in seconds
    pub code_ttl_seconds: i64,

    /// Wrong guesses allowed before the code is burnt
    pub max_attempts: u32,

    /// Minimum seconds between two codes for the same recipient
    pub resend_cooldown_seconds: i64,

    /// Channel used when the request does not name one ("email" or "whatsapp")
    pub default_channel: String,

    pub email: EmailProviderConfig,

    pub whatsapp: WhatsAppProviderConfig,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_ttl_seconds: 600,
            max_attempts: 5,
            resend_cooldown_seconds: 60,
            default_channel: String::from("email"),
            email: EmailProviderConfig::default(),
            whatsapp: WhatsAppProviderConfig::default(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let email = EmailProviderConfig {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.email.provider.clone()),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or(defaults.email.from_address.clone()),
        };
        let whatsapp = WhatsAppProviderConfig {
            provider: std::env::var("WHATSAPP_PROVIDER")
                .unwrap_or(defaults.whatsapp.provider.clone()),
            api_url: std::env::var("WHATSAPP_API_URL")
                .unwrap_or(defaults.whatsapp.api_url.clone()),
            access_token: std::env::var("WHATSAPP_ACCESS_TOKEN").unwrap_or_default(),
            phone_number_id: std::env::var("WHATSAPP_PHONE_NUMBER_ID").unwrap_or_default(),
        };

        Self {
            code_ttl_seconds: std::env::var("OTP_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_seconds),
            max_attempts: std::env::var("OTP_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
            resend_cooldown_seconds: std::env::var("OTP_RESEND_COOLDOWN_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.resend_cooldown_seconds),
            email,
            whatsapp,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.code_ttl_seconds, 600);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.resend_cooldown_seconds, 60);
        assert_eq!(config.email.provider, "mock");
        assert_eq!(config.whatsapp.provider, "mock");
    }
}
