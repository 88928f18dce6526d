use chrono::{DateTime, Utc};
use hb_core::domain::entities::review::Review;
use hb_core::services::review::{HotelReviews, NewReview, ReviewChanges};
use hb_shared::{PaginatedResponse, Pagination};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub hotel_id: Uuid,

    #[validate(range(min = 1, max = 5))]
    pub rating: u8,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            hotel_id: request.hotel_id,
            rating: request.rating,
            comment: request.comment,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewChanges {
    fn from(request: UpdateReviewRequest) -> Self {
        Self {
            rating: request.rating,
            comment: request.comment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            hotel_id: review.hotel_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// One page of a hotel's reviews with the average over all of them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelReviewsResponse {
    pub average_rating: Option<f64>,
    pub reviews: PaginatedResponse<ReviewResponse>,
}

impl HotelReviewsResponse {
    pub fn new(page: HotelReviews, pagination: Pagination) -> Self {
        let reviews = page.reviews.into_iter().map(ReviewResponse::from).collect();
        Self {
            average_rating: page.average_rating,
            reviews: PaginatedResponse::new(reviews, pagination, page.total),
        }
    }
}
