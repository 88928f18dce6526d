//! # StayHub API
//!
//! HTTP layer of the StayHub backend: actix-web routes, request/response
//! DTOs, error mapping and middleware. The binary in `main.rs` wires the
//! services to MySQL/Redis or to the in-memory backends.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, Repositories};
