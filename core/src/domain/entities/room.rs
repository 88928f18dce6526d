//! Room entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Twin => "twin",
            RoomType::Suite => "suite",
        }
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(RoomType::Single),
            "double" => Ok(RoomType::Double),
            "twin" => Ok(RoomType::Twin),
            "suite" => Ok(RoomType::Suite),
            other => Err(format!("Unknown room type: {}", other)),
        }
    }
}

/// A bookable room; `room_number` is unique within its hotel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    /// Maximum number of guests
    pub capacity: u32,
    /// Price per night in the smallest currency unit
    pub nightly_rate_cents: i64,
    /// Inactive rooms stay visible but cannot be booked
    pub is_active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(
        hotel_id: Uuid,
        room_number: String,
        room_type: RoomType,
        capacity: u32,
        nightly_rate_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            hotel_id,
            room_number,
            room_type,
            capacity,
            nightly_rate_cents,
            is_active: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Price of a stay of `nights` nights at the current rate
    pub fn price_for(&self, nights: i64) -> i64 {
        self.nightly_rate_cents.saturating_mul(nights)
    }
}
