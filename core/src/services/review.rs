//! Guest reviews of hotels

use hb_shared::Pagination;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::review::{Review, MAX_COMMENT_LENGTH};
use crate::domain::value_objects::Actor;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{HotelRepository, ReviewRepository};
use crate::services::cache::{review_key, ServiceCache};

#[derive(Debug, Clone)]
pub struct NewReview {
    pub hotel_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewChanges {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

/// One page of a hotel's reviews plus the overall average
#[derive(Debug, Clone)]
pub struct HotelReviews {
    pub reviews: Vec<Review>,
    pub total: u64,
    pub average_rating: Option<f64>,
}

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    hotels: Arc<dyn HotelRepository>,
    cache: ServiceCache,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        hotels: Arc<dyn HotelRepository>,
        cache: ServiceCache,
    ) -> Self {
        Self {
            reviews,
            hotels,
            cache,
        }
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Review> {
        let key = review_key(id);
        if let Some(review) = self.cache.get_json::<Review>(&key).await {
            return Ok(review);
        }
        let review = self.load(id).await?;
        self.cache.set_json(&key, &review).await;
        Ok(review)
    }

    pub async fn list_by_hotel(
        &self,
        hotel_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<HotelReviews> {
        if self.hotels.find_by_id(hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel"));
        }
        let (reviews, total) = self.reviews.list_by_hotel(hotel_id, pagination).await?;
        let average_rating = self.reviews.average_rating(hotel_id).await?;
        Ok(HotelReviews {
            reviews,
            total,
            average_rating,
        })
    }

    /// One review per guest and hotel
    pub async fn create(&self, actor: &Actor, input: NewReview) -> DomainResult<Review> {
        if self.hotels.find_by_id(input.hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel"));
        }
        check_rating(input.rating)?;
        let comment = normalize_comment(input.comment)?;

        if self
            .reviews
            .find_by_user_and_hotel(actor.user_id, input.hotel_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("You have already reviewed this hotel"));
        }

        let review = self
            .reviews
            .create(Review::new(actor.user_id, input.hotel_id, input.rating, comment))
            .await?;
        tracing::info!(review_id = %review.id, hotel_id = %review.hotel_id, "Review created");
        Ok(review)
    }

    /// Only the author edits a review
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: ReviewChanges,
    ) -> DomainResult<Review> {
        let mut review = self.load(id).await?;
        if review.user_id != actor.user_id {
            return Err(DomainError::Forbidden);
        }

        if let Some(rating) = changes.rating {
            check_rating(rating)?;
            review.rating = rating;
        }
        if let Some(comment) = changes.comment {
            review.comment = normalize_comment(Some(comment))?;
        }
        review.updated_at = chrono::Utc::now();

        let review = self.reviews.update(review).await?;
        self.cache.invalidate(&[review_key(id)]).await;
        Ok(review)
    }

    /// The author or an admin
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        let review = self.load(id).await?;
        actor.require_self_or_admin(review.user_id)?;

        self.reviews.delete(id).await?;
        self.cache.invalidate(&[review_key(id)]).await;
        Ok(())
    }

    async fn load(&self, id: Uuid) -> DomainResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))
    }
}

fn check_rating(rating: u8) -> DomainResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: "1".to_string(),
            max: "5".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Blank comments become `None`
fn normalize_comment(comment: Option<String>) -> DomainResult<Option<String>> {
    let comment = comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(text) = &comment {
        let length = text.chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(ValidationError::InvalidLength {
                field: "comment".to_string(),
                max: MAX_COMMENT_LENGTH,
                actual: length,
            }
            .into());
        }
    }
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestContext;

    fn review(hotel_id: Uuid, rating: u8) -> NewReview {
        NewReview {
            hotel_id,
            rating,
            comment: Some("  Lovely stay  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_average() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;

        let first = ctx
            .reviews
            .create(&ctx.guest(), review(hotel.id, 4))
            .await
            .unwrap();
        assert_eq!(first.comment.as_deref(), Some("Lovely stay"));
        ctx.reviews
            .create(&ctx.guest(), review(hotel.id, 5))
            .await
            .unwrap();

        let page = ctx
            .reviews
            .list_by_hotel(hotel.id, &Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.average_rating, Some(4.5));
    }

    #[tokio::test]
    async fn test_one_review_per_hotel() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let guest = ctx.guest();

        ctx.reviews.create(&guest, review(hotel.id, 4)).await.unwrap();
        let result = ctx.reviews.create(&guest, review(hotel.id, 2)).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_rating_and_comment_limits() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;

        let zero = ctx.reviews.create(&ctx.guest(), review(hotel.id, 0)).await;
        assert!(matches!(
            zero,
            Err(DomainError::ValidationErr(ValidationError::OutOfRange { .. }))
        ));

        let long = ctx
            .reviews
            .create(
                &ctx.guest(),
                NewReview {
                    hotel_id: hotel.id,
                    rating: 3,
                    comment: Some("x".repeat(MAX_COMMENT_LENGTH + 1)),
                },
            )
            .await;
        assert!(matches!(
            long,
            Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
        ));
    }

    #[tokio::test]
    async fn test_only_author_updates_admin_may_delete() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let author = ctx.guest();
        let created = ctx.reviews.create(&author, review(hotel.id, 3)).await.unwrap();
        ctx.reviews.get(created.id).await.unwrap();

        let changes = ReviewChanges {
            rating: Some(5),
            comment: Some(String::new()),
        };
        assert!(matches!(
            ctx.reviews
                .update(&ctx.admin(), created.id, changes.clone())
                .await,
            Err(DomainError::Forbidden)
        ));

        let updated = ctx.reviews.update(&author, created.id, changes).await.unwrap();
        assert_eq!(updated.rating, 5);
        assert_eq!(updated.comment, None);
        assert_eq!(ctx.reviews.get(created.id).await.unwrap().rating, 5);

        assert!(matches!(
            ctx.reviews.delete(&ctx.guest(), created.id).await,
            Err(DomainError::Forbidden)
        ));
        ctx.reviews.delete(&ctx.admin(), created.id).await.unwrap();
        assert!(matches!(
            ctx.reviews.get(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_review_unknown_hotel() {
        let ctx = TestContext::new();
        let result = ctx
            .reviews
            .create(&ctx.guest(), review(Uuid::new_v4(), 4))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
