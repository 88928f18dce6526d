//! Hotel entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_STAR_RATING: u8 = 1;
pub const MAX_STAR_RATING: u8 = 5;

/// A hotel located in a city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    /// 1 to 5
    pub star_rating: u8,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(
        city_id: Uuid,
        name: String,
        address: String,
        description: Option<String>,
        star_rating: u8,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            city_id,
            name,
            address,
            description,
            star_rating,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid_star_rating(rating: u8) -> bool {
        (MIN_STAR_RATING..=MAX_STAR_RATING).contains(&rating)
    }
}
