//! Rooms, room listings and availability

use chrono::NaiveDate;
use hb_shared::utils::validation::length_between;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::room::{Room, RoomType};
use crate::domain::value_objects::{Actor, StayDates, VersionCheck};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{BookingRepository, HotelRepository, RoomRepository};
use crate::services::cache::{hotel_rooms_key, room_key, ServiceCache};

const MAX_ROOM_NUMBER_LENGTH: usize = 20;
pub const MAX_CAPACITY: u32 = 20;

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub hotel_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    pub capacity: u32,
    pub nightly_rate_cents: i64,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct RoomChanges {
    pub room_number: Option<String>,
    pub room_type: Option<RoomType>,
    pub capacity: Option<u32>,
    pub nightly_rate_cents: Option<i64>,
    pub is_active: Option<bool>,
}

/// Answer to an availability query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomAvailability {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub available: bool,
    /// Price of the stay at the current rate
    pub total_price_cents: i64,
}

pub struct RoomService {
    rooms: Arc<dyn RoomRepository>,
    hotels: Arc<dyn HotelRepository>,
    bookings: Arc<dyn BookingRepository>,
    cache: ServiceCache,
}

impl RoomService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        hotels: Arc<dyn HotelRepository>,
        bookings: Arc<dyn BookingRepository>,
        cache: ServiceCache,
    ) -> Self {
        Self {
            rooms,
            hotels,
            bookings,
            cache,
        }
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Room> {
        let key = room_key(id);
        if let Some(room) = self.cache.get_json::<Room>(&key).await {
            return Ok(room);
        }
        let room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room"))?;
        self.cache.set_json(&key, &room).await;
        Ok(room)
    }

    pub async fn list_by_hotel(&self, hotel_id: Uuid) -> DomainResult<Vec<Room>> {
        let key = hotel_rooms_key(hotel_id);
        if let Some(rooms) = self.cache.get_json::<Vec<Room>>(&key).await {
            return Ok(rooms);
        }
        if self.hotels.find_by_id(hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel"));
        }
        let rooms = self.rooms.list_by_hotel(hotel_id).await?;
        self.cache.set_json(&key, &rooms).await;
        Ok(rooms)
    }

    pub async fn create(&self, actor: &Actor, input: NewRoom) -> DomainResult<Room> {
        actor.require_catalog_manager()?;
        if self.hotels.find_by_id(input.hotel_id).await?.is_none() {
            return Err(DomainError::not_found("Hotel"));
        }

        let room = Room::new(
            input.hotel_id,
            input.room_number.trim().to_string(),
            input.room_type,
            input.capacity,
            input.nightly_rate_cents,
        );
        validate(&room)?;

        let room = self.rooms.create(room).await?;
        self.cache.invalidate(&[hotel_rooms_key(room.hotel_id)]).await;
        tracing::info!(room_id = %room.id, hotel_id = %room.hotel_id, "Room created");
        Ok(room)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: RoomChanges,
        precondition: Option<VersionCheck>,
    ) -> DomainResult<Room> {
        actor.require_catalog_manager()?;

        let current = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room"))?;
        VersionCheck::verify_optional(precondition, current.version)?;

        let mut room = current.clone();
        if let Some(room_number) = changes.room_number {
            room.room_number = room_number.trim().to_string();
        }
        if let Some(room_type) = changes.room_type {
            room.room_type = room_type;
        }
        if let Some(capacity) = changes.capacity {
            room.capacity = capacity;
        }
        if let Some(rate) = changes.nightly_rate_cents {
            room.nightly_rate_cents = rate;
        }
        if let Some(is_active) = changes.is_active {
            room.is_active = is_active;
        }
        validate(&room)?;

        let room = self.rooms.update(room, current.version).await?;
        self.cache
            .invalidate(&[room_key(id), hotel_rooms_key(room.hotel_id)])
            .await;
        Ok(room)
    }

    /// Rooms that were ever booked are kept for the booking history;
    /// deactivate them instead
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.require_catalog_manager()?;

        let room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room"))?;
        let bookings = self.bookings.count_by_room(id).await?;
        if bookings > 0 {
            return Err(DomainError::conflict(format!(
                "Room has {} booking(s); deactivate it instead",
                bookings
            )));
        }

        self.rooms.delete(id).await?;
        self.cache
            .invalidate(&[room_key(id), hotel_rooms_key(room.hotel_id)])
            .await;
        tracing::info!(room_id = %id, actor = %actor.user_id, "Room deleted");
        Ok(())
    }

    /// Whether the room can be booked for `[check_in, check_out)`
    pub async fn availability(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<RoomAvailability> {
        let stay = StayDates::new(check_in, check_out)?;
        let room = self.get(room_id).await?;

        let available = room.is_active
            && self
                .bookings
                .is_room_available(room_id, stay.check_in(), stay.check_out(), None)
                .await?;

        Ok(RoomAvailability {
            room_id,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            nights: stay.nights(),
            available,
            total_price_cents: room.price_for(stay.nights()),
        })
    }
}

fn validate(room: &Room) -> DomainResult<()> {
    if room.room_number.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "room_number".to_string(),
        }
        .into());
    }
    if !length_between(&room.room_number, 1, MAX_ROOM_NUMBER_LENGTH) {
        return Err(ValidationError::InvalidLength {
            field: "room_number".to_string(),
            max: MAX_ROOM_NUMBER_LENGTH,
            actual: room.room_number.chars().count(),
        }
        .into());
    }
    if room.capacity < 1 || room.capacity > MAX_CAPACITY {
        return Err(ValidationError::OutOfRange {
            field: "capacity".to_string(),
            min: "1".to_string(),
            max: MAX_CAPACITY.to_string(),
        }
        .into());
    }
    if room.nightly_rate_cents <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "nightly_rate_cents".to_string(),
            min: "1".to_string(),
            max: i64::MAX.to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{days_from_today, TestContext};

    #[tokio::test]
    async fn test_create_and_list_rooms() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let manager = ctx.manager();

        for number in ["102", "101"] {
            ctx.rooms
                .create(
                    &manager,
                    NewRoom {
                        hotel_id: hotel.id,
                        room_number: number.to_string(),
                        room_type: RoomType::Double,
                        capacity: 2,
                        nightly_rate_cents: 10_000,
                    },
                )
                .await
                .unwrap();
        }

        let rooms = ctx.rooms.list_by_hotel(hotel.id).await.unwrap();
        let numbers: Vec<_> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "102"]);
    }

    #[tokio::test]
    async fn test_duplicate_room_number() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        let result = ctx
            .rooms
            .create(
                &ctx.admin(),
                NewRoom {
                    hotel_id: room.hotel_id,
                    room_number: room.room_number.clone(),
                    room_type: RoomType::Single,
                    capacity: 1,
                    nightly_rate_cents: 5_000,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_invalid_capacity_and_rate() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        let admin = ctx.admin();

        let zero_capacity = ctx
            .rooms
            .update(
                &admin,
                room.id,
                RoomChanges {
                    capacity: Some(0),
                    ..RoomChanges::default()
                },
                None,
            )
            .await;
        assert!(matches!(
            zero_capacity,
            Err(DomainError::ValidationErr(ValidationError::OutOfRange { .. }))
        ));

        let free = ctx
            .rooms
            .update(
                &admin,
                room.id,
                RoomChanges {
                    nightly_rate_cents: Some(0),
                    ..RoomChanges::default()
                },
                None,
            )
            .await;
        assert!(free.is_err());
    }

    #[tokio::test]
    async fn test_update_refreshes_listing_cache() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        ctx.rooms.list_by_hotel(room.hotel_id).await.unwrap();

        ctx.rooms
            .update(
                &ctx.manager(),
                room.id,
                RoomChanges {
                    is_active: Some(false),
                    ..RoomChanges::default()
                },
                Some(VersionCheck::Exact(room.version)),
            )
            .await
            .unwrap();

        let rooms = ctx.rooms.list_by_hotel(room.hotel_id).await.unwrap();
        assert!(!rooms[0].is_active);
        assert!(!ctx.rooms.get(room.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_availability() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        let guest = ctx.seed_verified_guest().await;

        let check_in = days_from_today(10);
        let check_out = days_from_today(13);
        let free = ctx.rooms.availability(room.id, check_in, check_out).await.unwrap();
        assert!(free.available);
        assert_eq!(free.nights, 3);
        assert_eq!(free.total_price_cents, room.nightly_rate_cents * 3);

        ctx.book(&guest, room.id, 11, 12).await;
        let taken = ctx.rooms.availability(room.id, check_in, check_out).await.unwrap();
        assert!(!taken.available);

        // Back-to-back stays do not overlap
        let after = ctx
            .rooms
            .availability(room.id, days_from_today(12), days_from_today(14))
            .await
            .unwrap();
        assert!(after.available);
    }

    #[tokio::test]
    async fn test_availability_rejects_inverted_dates() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        let result = ctx
            .rooms
            .availability(room.id, days_from_today(5), days_from_today(5))
            .await;
        assert!(matches!(
            result,
            Err(DomainError::ValidationErr(ValidationError::InvalidDateRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_booked_room_conflicts() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        let guest = ctx.seed_verified_guest().await;
        ctx.book(&guest, room.id, 3, 5).await;

        let result = ctx.rooms.delete(&ctx.admin(), room.id).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_delete_unbooked_room() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        ctx.rooms.delete(&ctx.admin(), room.id).await.unwrap();
        assert!(matches!(
            ctx.rooms.get(room.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
