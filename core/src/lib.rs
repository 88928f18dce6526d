//! # StayHub Core
//!
//! Core business logic and domain layer for the StayHub backend.
//! This crate contains domain entities, business services, repository interfaces
//! (with in-memory implementations), and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use domain::entities::*;
pub use domain::value_objects::*;
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    BookingRepository, CityRepository, HotelRepository, ReviewRepository, RoomRepository,
    TokenRepository, UserRepository,
};
