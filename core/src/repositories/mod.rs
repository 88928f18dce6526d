//! Repository interfaces and their in-memory implementations.
//!
//! MySQL implementations live in the infrastructure crate.

pub mod booking;
pub mod city;
pub mod hotel;
pub mod review;
pub mod room;
pub mod token;
pub mod user;

pub use booking::{BookingRepository, MockBookingRepository};
pub use city::{CityRepository, MockCityRepository};
pub use hotel::{HotelRepository, MockHotelRepository};
pub use review::{MockReviewRepository, ReviewRepository};
pub use room::{MockRoomRepository, RoomRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
