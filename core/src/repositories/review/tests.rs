use uuid::Uuid;

use crate::domain::entities::review::Review;
use crate::errors::DomainError;
use crate::repositories::review::{MockReviewRepository, ReviewRepository};

#[tokio::test]
async fn test_one_review_per_user_and_hotel() {
    let repo = MockReviewRepository::new();
    let user = Uuid::new_v4();
    let hotel = Uuid::new_v4();

    repo.create(Review::new(user, hotel, 5, None)).await.unwrap();
    let result = repo.create(Review::new(user, hotel, 3, None)).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert!(repo.find_by_user_and_hotel(user, hotel).await.unwrap().is_some());
}

#[tokio::test]
async fn test_average_rating() {
    let repo = MockReviewRepository::new();
    let hotel = Uuid::new_v4();
    assert_eq!(repo.average_rating(hotel).await.unwrap(), None);

    repo.create(Review::new(Uuid::new_v4(), hotel, 5, None)).await.unwrap();
    repo.create(Review::new(Uuid::new_v4(), hotel, 2, None)).await.unwrap();
    assert_eq!(repo.average_rating(hotel).await.unwrap(), Some(3.5));
}

#[tokio::test]
async fn test_delete_by_hotel() {
    let repo = MockReviewRepository::new();
    let hotel = Uuid::new_v4();
    let other = Uuid::new_v4();
    repo.create(Review::new(Uuid::new_v4(), hotel, 4, None)).await.unwrap();
    repo.create(Review::new(Uuid::new_v4(), hotel, 4, None)).await.unwrap();
    repo.create(Review::new(Uuid::new_v4(), other, 4, None)).await.unwrap();

    assert_eq!(repo.delete_by_hotel(hotel).await.unwrap(), 2);
    let (left, total) = repo
        .list_by_hotel(other, &hb_shared::Pagination::default())
        .await
        .unwrap();
    assert_eq!((left.len(), total), (1, 1));
}
