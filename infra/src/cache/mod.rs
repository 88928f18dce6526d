//! Cache module for Redis-based storage
//!
//! - `redis_client` - connection handling, retries and key prefixing
//! - `entity_cache` - [`hb_core::services::EntityCache`] over Redis
//! - `otp_store` - [`hb_core::services::OtpStore`] over Redis

pub mod entity_cache;
pub mod otp_store;
pub mod redis_client;


pub use entity_cache::RedisCache;
pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;
