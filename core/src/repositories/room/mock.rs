//! In-memory implementation of RoomRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::room::Room;
use crate::errors::DomainError;

use super::trait_::RoomRepository;

#[derive(Clone, Default)]
pub struct MockRoomRepository {
    rooms: Arc<RwLock<HashMap<Uuid, Room>>>,
}

impl MockRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn number_taken(rooms: &HashMap<Uuid, Room>, room: &Room) -> bool {
    rooms.values().any(|r| {
        r.id != room.id
            && r.hotel_id == room.hotel_id
            && r.room_number.eq_ignore_ascii_case(&room.room_number)
    })
}

#[async_trait]
impl RoomRepository for MockRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        Ok(self.rooms.read().await.get(&id).cloned())
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Room>, DomainError> {
        let rooms = self.rooms.read().await;
        let mut matching: Vec<Room> = rooms
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(matching)
    }

    async fn create(&self, room: Room) -> Result<Room, DomainError> {
        let mut rooms = self.rooms.write().await;
        if number_taken(&rooms, &room) {
            return Err(DomainError::conflict(format!(
                "Room number {} already exists in this hotel",
                room.room_number
            )));
        }
        rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn update(&self, mut room: Room, expected_version: i64) -> Result<Room, DomainError> {
        let mut rooms = self.rooms.write().await;
        let current = rooms
            .get(&room.id)
            .ok_or_else(|| DomainError::not_found("Room"))?;
        if current.version != expected_version {
            return Err(DomainError::PreconditionFailed {
                expected: expected_version,
                actual: current.version,
            });
        }
        if number_taken(&rooms, &room) {
            return Err(DomainError::conflict(format!(
                "Room number {} already exists in this hotel",
                room.room_number
            )));
        }
        room.version = expected_version + 1;
        room.updated_at = Utc::now();
        rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.rooms.write().await.remove(&id).is_some())
    }

    async fn count_by_hotel(&self, hotel_id: Uuid) -> Result<u64, DomainError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.values().filter(|r| r.hotel_id == hotel_id).count() as u64)
    }
}
