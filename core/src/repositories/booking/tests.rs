use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::value_objects::StayDates;
use crate::errors::DomainError;
use crate::repositories::booking::{BookingRepository, MockBookingRepository};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, d).unwrap()
}

fn booking(room_id: Uuid, from: u32, to: u32) -> Booking {
    let stay = StayDates::new(date(from), date(to)).unwrap();
    Booking::new(Uuid::new_v4(), room_id, stay, 1, 20_000)
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let repo = MockBookingRepository::new();
    let room = Uuid::new_v4();
    repo.create(booking(room, 10, 14)).await.unwrap();

    let result = repo.create(booking(room, 12, 16)).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));

    // checkout day is free for the next guest
    repo.create(booking(room, 14, 16)).await.unwrap();
    // other rooms are unaffected
    repo.create(booking(Uuid::new_v4(), 10, 14)).await.unwrap();
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_dates() {
    let repo = MockBookingRepository::new();
    let room = Uuid::new_v4();
    let mut first = repo.create(booking(room, 1, 5)).await.unwrap();
    assert!(!repo.is_room_available(room, date(2), date(3), None).await.unwrap());

    first.cancel();
    repo.update(first, 1).await.unwrap();
    assert!(repo.is_room_available(room, date(2), date(3), None).await.unwrap());
    repo.create(booking(room, 2, 3)).await.unwrap();
}

#[tokio::test]
async fn test_update_excludes_itself_from_overlap() {
    let repo = MockBookingRepository::new();
    let room = Uuid::new_v4();
    let mut stay = repo.create(booking(room, 10, 12)).await.unwrap();

    stay.check_out = date(13);
    let updated = repo.update(stay, 1).await.unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_concurrent_creates_only_one_wins() {
    let repo = Arc::new(MockBookingRepository::new());
    let room = Uuid::new_v4();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(booking(room, 20, 22)).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(repo.count_by_room(room).await.unwrap(), 1);
}
