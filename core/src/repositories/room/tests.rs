use uuid::Uuid;

use crate::domain::entities::room::{Room, RoomType};
use crate::errors::DomainError;
use crate::repositories::room::{MockRoomRepository, RoomRepository};

fn room(hotel_id: Uuid, number: &str) -> Room {
    Room::new(hotel_id, number.to_string(), RoomType::Double, 2, 10_000)
}

#[tokio::test]
async fn test_room_number_unique_per_hotel() {
    let repo = MockRoomRepository::new();
    let hotel_a = Uuid::new_v4();
    let hotel_b = Uuid::new_v4();

    repo.create(room(hotel_a, "101")).await.unwrap();
    repo.create(room(hotel_b, "101")).await.unwrap();
    let result = repo.create(room(hotel_a, "101")).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_renumbering_onto_taken_number_conflicts() {
    let repo = MockRoomRepository::new();
    let hotel = Uuid::new_v4();
    repo.create(room(hotel, "101")).await.unwrap();
    let mut second = repo.create(room(hotel, "102")).await.unwrap();

    second.room_number = "101".to_string();
    let result = repo.update(second, 1).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_list_by_hotel_sorted() {
    let repo = MockRoomRepository::new();
    let hotel = Uuid::new_v4();
    repo.create(room(hotel, "202")).await.unwrap();
    repo.create(room(hotel, "101")).await.unwrap();

    let rooms = repo.list_by_hotel(hotel).await.unwrap();
    assert_eq!(rooms[0].room_number, "101");
    assert_eq!(repo.count_by_hotel(hotel).await.unwrap(), 2);
}
