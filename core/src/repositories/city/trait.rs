//! City repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::city::City;
use crate::errors::DomainError;

/// Persistence operations for cities
#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<City>, DomainError>;

    /// Case-insensitive lookup on (name, country)
    async fn find_by_name(&self, name: &str, country: &str) -> Result<Option<City>, DomainError>;

    /// All cities ordered by name
    async fn list_all(&self) -> Result<Vec<City>, DomainError>;

    /// Insert a city; `Conflict` if (name, country) is taken
    async fn create(&self, city: City) -> Result<City, DomainError>;

    /// Replace a city's fields; `Conflict` if the new (name, country) is taken
    async fn update(&self, city: City) -> Result<City, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
