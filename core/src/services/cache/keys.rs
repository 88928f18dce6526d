//! Cache key layout shared by the services.

use uuid::Uuid;

pub const CITIES_ALL: &str = "cities:all";

pub fn city_key(id: Uuid) -> String {
    format!("cities:{}", id)
}

pub fn hotel_key(id: Uuid) -> String {
    format!("hotels:{}", id)
}

pub fn hotel_rooms_key(hotel_id: Uuid) -> String {
    format!("hotels:{}:rooms", hotel_id)
}

pub fn room_key(id: Uuid) -> String {
    format!("rooms:{}", id)
}

pub fn user_key(id: Uuid) -> String {
    format!("users:{}", id)
}

pub fn booking_key(id: Uuid) -> String {
    format!("bookings:{}", id)
}

pub fn review_key(id: Uuid) -> String {
    format!("reviews:{}", id)
}

/// Prefix of every review entry, cleared when reviews are removed in bulk
pub const REVIEWS_PREFIX: &str = "reviews:";
