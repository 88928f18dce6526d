use chrono::{DateTime, NaiveDate, Utc};
use hb_core::domain::entities::room::{Room, RoomType};
use hb_core::services::room::{NewRoom, RoomChanges};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    pub hotel_id: Uuid,

    #[validate(length(min = 1, max = 20))]
    pub room_number: String,

    pub room_type: RoomType,

    #[validate(range(min = 1, max = 20))]
    pub capacity: u32,

    /// Price of one night in cents
    #[validate(range(min = 1))]
    pub nightly_rate_cents: i64,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(request: CreateRoomRequest) -> Self {
        Self {
            hotel_id: request.hotel_id,
            room_number: request.room_number,
            room_type: request.room_type,
            capacity: request.capacity,
            nightly_rate_cents: request.nightly_rate_cents,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub room_number: Option<String>,

    pub room_type: Option<RoomType>,

    #[validate(range(min = 1, max = 20))]
    pub capacity: Option<u32>,

    #[validate(range(min = 1))]
    pub nightly_rate_cents: Option<i64>,

    pub is_active: Option<bool>,
}

impl From<UpdateRoomRequest> for RoomChanges {
    fn from(request: UpdateRoomRequest) -> Self {
        Self {
            room_number: request.room_number,
            room_type: request.room_type,
            capacity: request.capacity,
            nightly_rate_cents: request.nightly_rate_cents,
            is_active: request.is_active,
        }
    }
}

/// `?check_in=YYYY-MM-DD&check_out=YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    pub capacity: u32,
    pub nightly_rate_cents: i64,
    pub is_active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            hotel_id: room.hotel_id,
            room_number: room.room_number,
            room_type: room.room_type,
            capacity: room.capacity,
            nightly_rate_cents: room.nightly_rate_cents,
            is_active: room.is_active,
            version: room.version,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}
