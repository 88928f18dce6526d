//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and schema migrations
//! - Repository implementations for every `hb_core` repository trait

pub mod connection;
pub mod mysql;


pub use connection::DatabasePool;
pub use mysql::{
    MySqlBookingRepository, MySqlCityRepository, MySqlHotelRepository, MySqlReviewRepository,
    MySqlRoomRepository, MySqlTokenRepository, MySqlUserRepository,
};
