//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::otp::OtpChannel;

/// Result of sending a passcode
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    pub channel: OtpChannel,
    /// Destination with most characters masked, safe to echo back
    pub masked_destination: String,
    /// Message id from the provider
    pub message_id: String,
    pub expires_at: DateTime<Utc>,
    /// When another code may be requested
    pub next_resend_at: DateTime<Utc>,
}
