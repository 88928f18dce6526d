//! In-memory implementation of CityRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::city::City;
use crate::errors::DomainError;

use super::trait_::CityRepository;

#[derive(Clone, Default)]
pub struct MockCityRepository {
    cities: Arc<RwLock<HashMap<Uuid, City>>>,
}

impl MockCityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CityRepository for MockCityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<City>, DomainError> {
        Ok(self.cities.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str, country: &str) -> Result<Option<City>, DomainError> {
        let cities = self.cities.read().await;
        Ok(cities.values().find(|c| c.same_place(name, country)).cloned())
    }

    async fn list_all(&self) -> Result<Vec<City>, DomainError> {
        let cities = self.cities.read().await;
        let mut all: Vec<City> = cities.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.country.cmp(&b.country)));
        Ok(all)
    }

    async fn create(&self, city: City) -> Result<City, DomainError> {
        let mut cities = self.cities.write().await;
        if cities.values().any(|c| c.same_place(&city.name, &city.country)) {
            return Err(DomainError::conflict("City already exists"));
        }
        cities.insert(city.id, city.clone());
        Ok(city)
    }

    async fn update(&self, city: City) -> Result<City, DomainError> {
        let mut cities = self.cities.write().await;
        if !cities.contains_key(&city.id) {
            return Err(DomainError::not_found("City"));
        }
        if cities
            .values()
            .any(|c| c.id != city.id && c.same_place(&city.name, &city.country))
        {
            return Err(DomainError::conflict("City already exists"));
        }
        cities.insert(city.id, city.clone());
        Ok(city)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.cities.write().await.remove(&id).is_some())
    }
}
