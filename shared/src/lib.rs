//! Shared utilities and common types for the StayHub server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelopes and pagination
//! - Utility functions (email/phone validation, log masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheBackend, CacheConfig, DatabaseConfig, Environment, JwtConfig,
    OtpConfig, ServerConfig, StorageBackend,
};
pub use types::{ApiResponse, ErrorResponse, PaginatedResponse, Pagination};
pub use utils::validation;
