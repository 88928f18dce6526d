//! Room repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::room::Room;
use crate::errors::DomainError;

/// Persistence operations for rooms
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError>;

    /// Rooms of a hotel ordered by room number
    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Room>, DomainError>;

    /// Insert a room; `Conflict` if the room number is taken in that hotel
    async fn create(&self, room: Room) -> Result<Room, DomainError>;

    /// Versioned write; `Conflict` if the new room number is taken
    async fn update(&self, room: Room, expected_version: i64) -> Result<Room, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn count_by_hotel(&self, hotel_id: Uuid) -> Result<u64, DomainError>;
}
