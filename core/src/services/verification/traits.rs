//! Delivery and storage seams for one-time passcodes

use async_trait::async_trait;

use crate::domain::entities::otp::{OtpChannel, OtpCode, OtpPurpose};

/// Delivers a passcode over one channel
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Channel this sender serves
    fn channel(&self) -> OtpChannel;

    /// Check the destination format (email address or E.164 phone)
    fn is_valid_destination(&self, destination: &str) -> bool;

    /// Send the code, returning the provider's message id
    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<String, String>;
}

/// Keeps at most one live code per (recipient, purpose) and the number of
/// submissions made against it
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store a code, replacing any previous one for the same key and
    /// resetting its attempt count
    async fn put(&self, code: OtpCode) -> Result<(), String>;

    /// Fetch the current code
    async fn get(&self, recipient_key: &str, purpose: OtpPurpose)
        -> Result<Option<OtpCode>, String>;

    /// Count one more submission against `code` and return the new total.
    /// Must be atomic: concurrent callers each observe a distinct count. The
    /// count outlives [`OtpStore::remove`] and is only reset by `put`.
    async fn record_attempt(&self, code: &OtpCode) -> Result<u32, String>;

    /// Delete the code, returning whether this call removed it
    async fn remove(&self, recipient_key: &str, purpose: OtpPurpose) -> Result<bool, String>;
}
