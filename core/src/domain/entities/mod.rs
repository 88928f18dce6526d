//! Domain entities representing core business objects.

pub mod booking;
pub mod city;
pub mod hotel;
pub mod otp;
pub mod review;
pub mod room;
pub mod token;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use city::City;
pub use hotel::{Hotel, MAX_STAR_RATING, MIN_STAR_RATING};
pub use otp::{OtpChannel, OtpCode, OtpPurpose, CODE_LENGTH};
pub use review::{Review, MAX_COMMENT_LENGTH};
pub use room::{Room, RoomType};
pub use token::{Claims, RefreshToken, RevokedToken, TokenPair};
pub use user::{User, UserRole};
