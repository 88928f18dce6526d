//! Business services on top of the repositories

pub mod auth;
pub mod booking;
pub mod cache;
pub mod city;
pub mod hotel;
pub mod review;
pub mod room;
pub mod sweeper;
pub mod token;
pub mod user;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, AuthServiceConfig};
pub use booking::BookingService;
pub use cache::{EntityCache, MemoryCache, ServiceCache};
pub use city::CityService;
pub use hotel::HotelService;
pub use review::ReviewService;
pub use room::RoomService;
pub use sweeper::MemorySweeper;
pub use token::{TokenCleanupService, TokenService};
pub use user::UserService;
pub use verification::{OtpSender, OtpSenderFactory, OtpStore, VerificationService};
