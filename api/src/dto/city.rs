use chrono::{DateTime, Utc};
use hb_core::domain::entities::city::City;
use hb_core::services::city::CityInput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of both create and replace
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CityRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub country: String,
}

impl From<CityRequest> for CityInput {
    fn from(request: CityRequest) -> Self {
        Self {
            name: request.name,
            country: request.country,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityResponse {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            country: city.country,
            created_at: city.created_at,
            updated_at: city.updated_at,
        }
    }
}
