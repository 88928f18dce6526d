//! One-time passcode issue and verification.
//!
//! - `OtpSender` is the delivery strategy, one per channel
//! - `OtpSenderFactory` picks the sender for a requested channel
//! - `OtpStore` keeps hashed codes with their attempt counters

mod config;
mod factory;
mod memory_store;
mod mock_sender;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use factory::OtpSenderFactory;
pub use memory_store::InMemoryOtpStore;
pub use mock_sender::{MockOtpSender, SentCode};
pub use service::VerificationService;
pub use traits::{OtpSender, OtpStore};
pub use types::SendCodeResult;
