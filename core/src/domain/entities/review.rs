//! Review entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_COMMENT_LENGTH: usize = 2000;

/// A guest's rating of a hotel; one per (user, hotel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    /// 1 to 5
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(user_id: Uuid, hotel_id: Uuid, rating: u8, comment: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            hotel_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}
