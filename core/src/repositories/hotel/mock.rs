//! In-memory implementation of HotelRepository

use async_trait::async_trait;
use chrono::Utc;
use hb_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::hotel::Hotel;
use crate::errors::DomainError;

use super::trait_::HotelRepository;

#[derive(Clone, Default)]
pub struct MockHotelRepository {
    hotels: Arc<RwLock<HashMap<Uuid, Hotel>>>,
}

impl MockHotelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelRepository for MockHotelRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>, DomainError> {
        Ok(self.hotels.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        city_id: Option<Uuid>,
        pagination: &Pagination,
    ) -> Result<(Vec<Hotel>, u64), DomainError> {
        let hotels = self.hotels.read().await;
        let mut matching: Vec<Hotel> = hotels
            .values()
            .filter(|h| city_id.map_or(true, |city| h.city_id == city))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn create(&self, hotel: Hotel) -> Result<Hotel, DomainError> {
        let mut hotels = self.hotels.write().await;
        hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn update(&self, mut hotel: Hotel, expected_version: i64) -> Result<Hotel, DomainError> {
        let mut hotels = self.hotels.write().await;
        let current = hotels
            .get(&hotel.id)
            .ok_or_else(|| DomainError::not_found("Hotel"))?;
        if current.version != expected_version {
            return Err(DomainError::PreconditionFailed {
                expected: expected_version,
                actual: current.version,
            });
        }
        hotel.version = expected_version + 1;
        hotel.updated_at = Utc::now();
        hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.hotels.write().await.remove(&id).is_some())
    }

    async fn count_by_city(&self, city_id: Uuid) -> Result<u64, DomainError> {
        let hotels = self.hotels.read().await;
        Ok(hotels.values().filter(|h| h.city_id == city_id).count() as u64)
    }
}
