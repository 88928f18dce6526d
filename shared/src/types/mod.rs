//! Type definitions shared across crates
//!
//! - `pagination` - Pagination for list endpoints
//! - `response` - API response wrappers and health checks

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{ApiResponse, ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
