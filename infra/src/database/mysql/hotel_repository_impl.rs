//! MySQL implementation of the HotelRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use hb_core::domain::entities::hotel::Hotel;
use hb_core::errors::DomainError;
use hb_core::repositories::HotelRepository;
use hb_shared::Pagination;

use super::row::{column, count, query_error, uuid_column, version_conflict};

const HOTEL_COLUMNS: &str =
    "id, city_id, name, address, description, star_rating, version, created_at, updated_at";

pub struct MySqlHotelRepository {
    pool: MySqlPool,
}

impl MySqlHotelRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_hotel(row: &MySqlRow) -> Result<Hotel, DomainError> {
        Ok(Hotel {
            id: uuid_column(row, "id")?,
            city_id: uuid_column(row, "city_id")?,
            name: column(row, "name")?,
            address: column(row, "address")?,
            description: column(row, "description")?,
            star_rating: column(row, "star_rating")?,
            version: column(row, "version")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl HotelRepository for MySqlHotelRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>, DomainError> {
        let query = format!("SELECT {} FROM hotels WHERE id = ? LIMIT 1", HOTEL_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_hotel).transpose()
    }

    async fn list(
        &self,
        city_id: Option<Uuid>,
        pagination: &Pagination,
    ) -> Result<(Vec<Hotel>, u64), DomainError> {
        let city = city_id.map(|id| id.to_string());
        let query = format!(
            r#"
            SELECT {} FROM hotels
            WHERE (? IS NULL OR city_id = ?)
            ORDER BY name ASC, id ASC
            LIMIT ? OFFSET ?
            "#,
            HOTEL_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(&city)
            .bind(&city)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM hotels WHERE (? IS NULL OR city_id = ?)")
                .bind(&city)
                .bind(&city)
                .fetch_one(&self.pool)
                .await
                .map_err(query_error)?;

        let hotels = rows
            .iter()
            .map(Self::row_to_hotel)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((hotels, count(total)))
    }

    async fn create(&self, hotel: Hotel) -> Result<Hotel, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO hotels (
                id, city_id, name, address, description, star_rating,
                version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(hotel.id.to_string())
        .bind(hotel.city_id.to_string())
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.description)
        .bind(hotel.star_rating)
        .bind(hotel.version)
        .bind(hotel.created_at)
        .bind(hotel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(hotel)
    }

    async fn update(&self, mut hotel: Hotel, expected_version: i64) -> Result<Hotel, DomainError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE hotels SET
                city_id = ?,
                name = ?,
                address = ?,
                description = ?,
                star_rating = ?,
                version = version + 1,
                updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(hotel.city_id.to_string())
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.description)
        .bind(hotel.star_rating)
        .bind(now)
        .bind(hotel.id.to_string())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(
                version_conflict(&self.pool, "hotels", "Hotel", hotel.id, expected_version).await,
            );
        }

        hotel.version = expected_version + 1;
        hotel.updated_at = now;
        Ok(hotel)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_city(&self, city_id: Uuid) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels WHERE city_id = ?")
            .bind(city_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(count(total))
    }
}
