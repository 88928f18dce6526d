//! Review repository trait.

use async_trait::async_trait;
use hb_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::review::Review;
use crate::errors::DomainError;

/// Persistence operations for reviews
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError>;

    async fn find_by_user_and_hotel(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
    ) -> Result<Option<Review>, DomainError>;

    /// A hotel's reviews, newest first
    async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
        pagination: &Pagination,
    ) -> Result<(Vec<Review>, u64), DomainError>;

    /// Mean rating of a hotel; `None` without reviews
    async fn average_rating(&self, hotel_id: Uuid) -> Result<Option<f64>, DomainError>;

    /// Insert a review; `Conflict` if the user already reviewed the hotel
    async fn create(&self, review: Review) -> Result<Review, DomainError>;

    async fn update(&self, review: Review) -> Result<Review, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Remove all reviews of a hotel, returning how many were removed
    async fn delete_by_hotel(&self, hotel_id: Uuid) -> Result<u64, DomainError>;

    /// Remove all reviews written by a user
    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, DomainError>;
}
