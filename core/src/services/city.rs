//! City catalogue

use hb_shared::utils::validation::length_between;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::city::City;
use crate::domain::value_objects::Actor;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{CityRepository, HotelRepository};
use crate::services::cache::{city_key, ServiceCache, CITIES_ALL};

const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone)]
pub struct CityInput {
    pub name: String,
    pub country: String,
}

impl CityInput {
    fn validated(self) -> DomainResult<(String, String)> {
        let name = self.name.trim().to_string();
        let country = self.country.trim().to_string();
        for (field, value) in [("name", &name), ("country", &country)] {
            if value.is_empty() {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                }
                .into());
            }
            if !length_between(value, 1, MAX_NAME_LENGTH) {
                return Err(ValidationError::InvalidLength {
                    field: field.to_string(),
                    max: MAX_NAME_LENGTH,
                    actual: value.chars().count(),
                }
                .into());
            }
        }
        Ok((name, country))
    }
}

pub struct CityService {
    cities: Arc<dyn CityRepository>,
    hotels: Arc<dyn HotelRepository>,
    cache: ServiceCache,
}

impl CityService {
    pub fn new(
        cities: Arc<dyn CityRepository>,
        hotels: Arc<dyn HotelRepository>,
        cache: ServiceCache,
    ) -> Self {
        Self {
            cities,
            hotels,
            cache,
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<City>> {
        if let Some(cities) = self.cache.get_json::<Vec<City>>(CITIES_ALL).await {
            return Ok(cities);
        }
        let cities = self.cities.list_all().await?;
        self.cache.set_json(CITIES_ALL, &cities).await;
        Ok(cities)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<City> {
        let key = city_key(id);
        if let Some(city) = self.cache.get_json::<City>(&key).await {
            return Ok(city);
        }
        let city = self
            .cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("City"))?;
        self.cache.set_json(&key, &city).await;
        Ok(city)
    }

    pub async fn create(&self, actor: &Actor, input: CityInput) -> DomainResult<City> {
        actor.require_catalog_manager()?;
        let (name, country) = input.validated()?;

        if self.cities.find_by_name(&name, &country).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "City {} ({}) already exists",
                name, country
            )));
        }

        let city = self.cities.create(City::new(name, country)).await?;
        self.cache.invalidate(&[CITIES_ALL.to_string()]).await;

        tracing::info!(city_id = %city.id, actor = %actor.user_id, "City created");
        Ok(city)
    }

    /// Full replacement of name and country
    pub async fn update(&self, actor: &Actor, id: Uuid, input: CityInput) -> DomainResult<City> {
        actor.require_catalog_manager()?;
        let (name, country) = input.validated()?;

        let mut city = self
            .cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("City"))?;

        if !city.same_place(&name, &country) {
            if let Some(other) = self.cities.find_by_name(&name, &country).await? {
                if other.id != id {
                    return Err(DomainError::conflict(format!(
                        "City {} ({}) already exists",
                        name, country
                    )));
                }
            }
        }

        city.rename(name, country);
        let city = self.cities.update(city).await?;
        self.cache
            .invalidate(&[CITIES_ALL.to_string(), city_key(id)])
            .await;
        Ok(city)
    }

    /// Cities that still have hotels cannot be deleted
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.require_catalog_manager()?;

        if self.cities.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("City"));
        }
        let hotels = self.hotels.count_by_city(id).await?;
        if hotels > 0 {
            return Err(DomainError::conflict(format!(
                "City still has {} hotel(s)",
                hotels
            )));
        }

        self.cities.delete(id).await?;
        self.cache
            .invalidate(&[CITIES_ALL.to_string(), city_key(id)])
            .await;
        tracing::info!(city_id = %id, actor = %actor.user_id, "City deleted");
        Ok(())
    }
}
