//! In-memory implementation of BookingRepository.
//!
//! The overlap check runs under the same write lock as the insert.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use hb_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainError;

use super::trait_::BookingRepository;

#[derive(Clone, Default)]
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_overlap(
    bookings: &HashMap<Uuid, Booking>,
    room_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<Uuid>,
) -> bool {
    bookings.values().any(|b| {
        b.room_id == room_id
            && Some(b.id) != exclude
            && b.blocks_room()
            && b.overlaps(check_in, check_out)
    })
}

fn paginate(mut bookings: Vec<Booking>, pagination: &Pagination) -> (Vec<Booking>, u64) {
    bookings.sort_by(|a, b| b.check_in.cmp(&a.check_in).then_with(|| a.id.cmp(&b.id)));
    let total = bookings.len() as u64;
    let page = bookings
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .collect();
    (page, total)
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> Result<(Vec<Booking>, u64), DomainError> {
        let bookings = self.bookings.read().await;
        let mine = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(mine, pagination))
    }

    async fn list_all(&self, pagination: &Pagination) -> Result<(Vec<Booking>, u64), DomainError> {
        let bookings = self.bookings.read().await;
        Ok(paginate(bookings.values().cloned().collect(), pagination))
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;
        if booking.blocks_room()
            && has_overlap(
                &bookings,
                booking.room_id,
                booking.check_in,
                booking.check_out,
                None,
            )
        {
            return Err(DomainError::conflict(
                "Room is already booked for the requested dates",
            ));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update(
        &self,
        mut booking: Booking,
        expected_version: i64,
    ) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;
        let current = bookings
            .get(&booking.id)
            .ok_or_else(|| DomainError::not_found("Booking"))?;
        if current.version != expected_version {
            return Err(DomainError::PreconditionFailed {
                expected: expected_version,
                actual: current.version,
            });
        }
        if booking.blocks_room()
            && has_overlap(
                &bookings,
                booking.room_id,
                booking.check_in,
                booking.check_out,
                Some(booking.id),
            )
        {
            return Err(DomainError::conflict(
                "Room is already booked for the requested dates",
            ));
        }
        booking.version = expected_version + 1;
        booking.updated_at = Utc::now();
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.bookings.write().await.remove(&id).is_some())
    }

    async fn is_room_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(!has_overlap(&bookings, room_id, check_in, check_out, exclude))
    }

    async fn count_by_room(&self, room_id: Uuid) -> Result<u64, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().filter(|b| b.room_id == room_id).count() as u64)
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().filter(|b| b.user_id == user_id).count() as u64)
    }
}
