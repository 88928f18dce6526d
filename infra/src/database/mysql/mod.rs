//! MySQL repository implementations

mod booking_repository_impl;
mod city_repository_impl;
mod hotel_repository_impl;
mod review_repository_impl;
mod room_repository_impl;
mod row;
mod token_repository_impl;
mod user_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use city_repository_impl::MySqlCityRepository;
pub use hotel_repository_impl::MySqlHotelRepository;
pub use review_repository_impl::MySqlReviewRepository;
pub use room_repository_impl::MySqlRoomRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
