//! Passcode delivery providers
//!
//! Implementations of [`hb_core::services::OtpSender`] for real channels,
//! plus [`build_sender_factory`] which wires them up from `OtpConfig`.

mod email;
mod factory;
mod http;
mod message;
mod whatsapp;


pub use email::HttpEmailSender;
pub use factory::build_sender_factory;
pub use http::RetryPolicy;
pub use whatsapp::WhatsAppCloudSender;
