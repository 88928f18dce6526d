//! Token service module for JWT management
//!
//! - JWT access token generation and verification (HS256)
//! - Refresh token issue and rotation
//! - Access-token revocation keyed by `jti`
//! - Background cleanup of expired tokens

mod cleanup;
mod config;
mod service;


pub use cleanup::{CleanupReport, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
