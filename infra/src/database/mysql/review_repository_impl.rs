//! MySQL implementation of the ReviewRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use hb_core::domain::entities::review::Review;
use hb_core::errors::DomainError;
use hb_core::repositories::ReviewRepository;
use hb_shared::Pagination;

use super::row::{column, count, query_error, uuid_column, write_error};

const REVIEW_COLUMNS: &str = "id, user_id, hotel_id, rating, comment, created_at, updated_at";

pub struct MySqlReviewRepository {
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &MySqlRow) -> Result<Review, DomainError> {
        Ok(Review {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            hotel_id: uuid_column(row, "hotel_id")?,
            rating: column(row, "rating")?,
            comment: column(row, "comment")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let query = format!("SELECT {} FROM reviews WHERE id = ? LIMIT 1", REVIEW_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn find_by_user_and_hotel(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
    ) -> Result<Option<Review>, DomainError> {
        let query = format!(
            "SELECT {} FROM reviews WHERE user_id = ? AND hotel_id = ? LIMIT 1",
            REVIEW_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(hotel_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
        pagination: &Pagination,
    ) -> Result<(Vec<Review>, u64), DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM reviews
            WHERE hotel_id = ?
            ORDER BY created_at DESC, id ASC
            LIMIT ? OFFSET ?
            "#,
            REVIEW_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(hotel_id.to_string())
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE hotel_id = ?")
            .bind(hotel_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let reviews = rows
            .iter()
            .map(Self::row_to_review)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((reviews, count(total)))
    }

    async fn average_rating(&self, hotel_id: Uuid) -> Result<Option<f64>, DomainError> {
        // AVG yields DECIMAL; cast so it decodes as f64
        sqlx::query_scalar("SELECT CAST(AVG(rating) AS DOUBLE) FROM reviews WHERE hotel_id = ?")
            .bind(hotel_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)
    }

    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, user_id, hotel_id, rating, comment, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id.to_string())
        .bind(review.user_id.to_string())
        .bind(review.hotel_id.to_string())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "You have already reviewed this hotel"))?;

        Ok(review)
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let result = sqlx::query(
            "UPDATE reviews SET rating = ?, comment = ?, updated_at = ? WHERE id = ?",
        )
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.updated_at)
        .bind(review.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 && self.find_by_id(review.id).await?.is_none() {
            return Err(DomainError::not_found("Review"));
        }
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_hotel(&self, hotel_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE hotel_id = ?")
            .bind(hotel_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }
}
