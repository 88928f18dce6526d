//! In-memory implementation of ReviewRepository

use async_trait::async_trait;
use hb_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::review::Review;
use crate::errors::DomainError;

use super::trait_::ReviewRepository;

#[derive(Clone, Default)]
pub struct MockReviewRepository {
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
}

impl MockReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        Ok(self.reviews.read().await.get(&id).cloned())
    }

    async fn find_by_user_and_hotel(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
    ) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .find(|r| r.user_id == user_id && r.hotel_id == hotel_id)
            .cloned())
    }

    async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
        pagination: &Pagination,
    ) -> Result<(Vec<Review>, u64), DomainError> {
        let reviews = self.reviews.read().await;
        let mut matching: Vec<Review> = reviews
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn average_rating(&self, hotel_id: Uuid) -> Result<Option<f64>, DomainError> {
        let reviews = self.reviews.read().await;
        let ratings: Vec<f64> = reviews
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.rating as f64)
            .collect();
        if ratings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ratings.iter().sum::<f64>() / ratings.len() as f64))
    }

    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        if reviews
            .values()
            .any(|r| r.user_id == review.user_id && r.hotel_id == review.hotel_id)
        {
            return Err(DomainError::conflict("You have already reviewed this hotel"));
        }
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        if !reviews.contains_key(&review.id) {
            return Err(DomainError::not_found("Review"));
        }
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.reviews.write().await.remove(&id).is_some())
    }

    async fn delete_by_hotel(&self, hotel_id: Uuid) -> Result<u64, DomainError> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|_, r| r.hotel_id != hotel_id);
        Ok((before - reviews.len()) as u64)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|_, r| r.user_id != user_id);
        Ok((before - reviews.len()) as u64)
    }
}
