use chrono::{DateTime, Utc};
use hb_core::domain::entities::hotel::Hotel;
use hb_core::services::hotel::{HotelChanges, NewHotel};
use hb_shared::types::pagination::DEFAULT_PER_PAGE;
use hb_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHotelRequest {
    pub city_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 500))]
    pub address: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub star_rating: u8,
}

impl From<CreateHotelRequest> for NewHotel {
    fn from(request: CreateHotelRequest) -> Self {
        Self {
            city_id: request.city_id,
            name: request.name,
            address: request.address,
            description: request.description,
            star_rating: request.star_rating,
        }
    }
}

/// PATCH body; an empty `description` removes it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateHotelRequest {
    pub city_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub star_rating: Option<u8>,
}

impl From<UpdateHotelRequest> for HotelChanges {
    fn from(request: UpdateHotelRequest) -> Self {
        Self {
            city_id: request.city_id,
            name: request.name,
            address: request.address,
            description: request.description,
            star_rating: request.star_rating,
        }
    }
}

/// `GET /hotels?city_id=&page=&per_page=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelListQuery {
    pub city_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl HotelListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelResponse {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub star_rating: u8,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            city_id: hotel.city_id,
            name: hotel.name,
            address: hotel.address,
            description: hotel.description,
            star_rating: hotel.star_rating,
            version: hotel.version,
            created_at: hotel.created_at,
            updated_at: hotel.updated_at,
        }
    }
}
