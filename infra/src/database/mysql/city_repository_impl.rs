//! MySQL implementation of the CityRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use hb_core::domain::entities::city::City;
use hb_core::errors::DomainError;
use hb_core::repositories::CityRepository;

use super::row::{column, query_error, uuid_column, write_error};

const DUPLICATE_CITY: &str = "City already exists";

pub struct MySqlCityRepository {
    pool: MySqlPool,
}

impl MySqlCityRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_city(row: &MySqlRow) -> Result<City, DomainError> {
        Ok(City {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
            country: column(row, "country")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl CityRepository for MySqlCityRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<City>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, country, created_at, updated_at FROM cities WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.as_ref().map(Self::row_to_city).transpose()
    }

    async fn find_by_name(&self, name: &str, country: &str) -> Result<Option<City>, DomainError> {
        // The table collation is case-insensitive
        let row = sqlx::query(
            r#"
            SELECT id, name, country, created_at, updated_at
            FROM cities
            WHERE name = ? AND country = ?
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(country)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.as_ref().map(Self::row_to_city).transpose()
    }

    async fn list_all(&self) -> Result<Vec<City>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, country, created_at, updated_at FROM cities ORDER BY name, country",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter().map(Self::row_to_city).collect()
    }

    async fn create(&self, city: City) -> Result<City, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO cities (id, name, country, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(city.id.to_string())
        .bind(&city.name)
        .bind(&city.country)
        .bind(city.created_at)
        .bind(city.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, DUPLICATE_CITY))?;

        Ok(city)
    }

    async fn update(&self, city: City) -> Result<City, DomainError> {
        let result = sqlx::query(
            "UPDATE cities SET name = ?, country = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&city.name)
        .bind(&city.country)
        .bind(city.updated_at)
        .bind(city.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, DUPLICATE_CITY))?;

        // MySQL reports matched-but-unchanged rows as 0 affected
        if result.rows_affected() == 0 && self.find_by_id(city.id).await?.is_none() {
            return Err(DomainError::not_found("City"));
        }
        Ok(city)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
