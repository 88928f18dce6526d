//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `hb_core`:
//! - **Database**: MySQL repositories using SQLx, connection pool and migrations
//! - **Cache**: Redis-backed entity cache and passcode store
//! - **OTP delivery**: email and WhatsApp senders over HTTP
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

pub use hb_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client, entity cache and passcode store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Passcode delivery providers
pub mod otp;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Passcode delivery error
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Stored data could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
