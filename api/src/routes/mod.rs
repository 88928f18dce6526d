//! HTTP route handlers, one module per resource.
//!
//! Every module exposes `configure` for mounting under `/api/v1`; `health`
//! is mounted at the root.

pub mod auth;
pub mod bookings;
pub mod cities;
pub mod health;
pub mod hotels;
pub mod reviews;
pub mod rooms;
pub mod users;

use actix_web::{web, HttpResponse};
use hb_core::errors::DomainError;

use crate::handlers::ApiError;
use crate::middleware::JwtAuth;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").configure(auth::configure))
        .service(
            web::scope("/users")
                .wrap(JwtAuth::new())
                .configure(users::configure),
        )
        .service(web::scope("/cities").configure(cities::configure))
        .service(web::scope("/hotels").configure(hotels::configure))
        .service(web::scope("/rooms").configure(rooms::configure))
        .service(
            web::scope("/bookings")
                .wrap(JwtAuth::new())
                .configure(bookings::configure),
        )
        .service(web::scope("/reviews").configure(reviews::configure));
}

/// JSON 404 for unmatched paths
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(DomainError::not_found("Route").into())
}
