//! Hotel repository trait.

use async_trait::async_trait;
use hb_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::hotel::Hotel;
use crate::errors::DomainError;

/// Persistence operations for hotels
#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>, DomainError>;

    /// One page of hotels ordered by name, optionally restricted to a city,
    /// plus the total count matching the filter
    async fn list(
        &self,
        city_id: Option<Uuid>,
        pagination: &Pagination,
    ) -> Result<(Vec<Hotel>, u64), DomainError>;

    async fn create(&self, hotel: Hotel) -> Result<Hotel, DomainError>;

    /// Versioned write; see [`crate::repositories::UserRepository::update`]
    async fn update(&self, hotel: Hotel, expected_version: i64) -> Result<Hotel, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Number of hotels in a city
    async fn count_by_city(&self, city_id: Uuid) -> Result<u64, DomainError>;
}
