//! MySQL implementation of the RoomRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use hb_core::domain::entities::room::Room;
use hb_core::errors::DomainError;
use hb_core::repositories::RoomRepository;

use super::row::{column, count, enum_column, query_error, uuid_column, version_conflict, write_error};

const ROOM_COLUMNS: &str = "id, hotel_id, room_number, room_type, capacity, nightly_rate_cents, \
                            is_active, version, created_at, updated_at";

const DUPLICATE_ROOM: &str = "Room number already exists in this hotel";

pub struct MySqlRoomRepository {
    pool: MySqlPool,
}

impl MySqlRoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_room(row: &MySqlRow) -> Result<Room, DomainError> {
        Ok(Room {
            id: uuid_column(row, "id")?,
            hotel_id: uuid_column(row, "hotel_id")?,
            room_number: column(row, "room_number")?,
            room_type: enum_column(row, "room_type")?,
            capacity: column(row, "capacity")?,
            nightly_rate_cents: column(row, "nightly_rate_cents")?,
            is_active: column(row, "is_active")?,
            version: column(row, "version")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl RoomRepository for MySqlRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        let query = format!("SELECT {} FROM rooms WHERE id = ? LIMIT 1", ROOM_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_room).transpose()
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Room>, DomainError> {
        let query = format!(
            "SELECT {} FROM rooms WHERE hotel_id = ? ORDER BY room_number ASC",
            ROOM_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(hotel_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(Self::row_to_room).collect()
    }

    async fn create(&self, room: Room) -> Result<Room, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO rooms (
                id, hotel_id, room_number, room_type, capacity, nightly_rate_cents,
                is_active, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(room.id.to_string())
        .bind(room.hotel_id.to_string())
        .bind(&room.room_number)
        .bind(room.room_type.as_str())
        .bind(room.capacity)
        .bind(room.nightly_rate_cents)
        .bind(room.is_active)
        .bind(room.version)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, DUPLICATE_ROOM))?;

        Ok(room)
    }

    async fn update(&self, mut room: Room, expected_version: i64) -> Result<Room, DomainError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE rooms SET
                room_number = ?,
                room_type = ?,
                capacity = ?,
                nightly_rate_cents = ?,
                is_active = ?,
                version = version + 1,
                updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&room.room_number)
        .bind(room.room_type.as_str())
        .bind(room.capacity)
        .bind(room.nightly_rate_cents)
        .bind(room.is_active)
        .bind(now)
        .bind(room.id.to_string())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, DUPLICATE_ROOM))?;

        if result.rows_affected() == 0 {
            return Err(
                version_conflict(&self.pool, "rooms", "Room", room.id, expected_version).await,
            );
        }

        room.version = expected_version + 1;
        room.updated_at = now;
        Ok(room)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_hotel(&self, hotel_id: Uuid) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE hotel_id = ?")
            .bind(hotel_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(count(total))
    }
}
