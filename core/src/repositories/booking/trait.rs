//! Booking repository trait.
//!
//! Implementations must make the overlap check and the write a single
//! atomic step: two concurrent `create` calls for overlapping stays of the
//! same room can never both succeed.

use async_trait::async_trait;
use chrono::NaiveDate;
use hb_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::errors::DomainError;

/// Persistence operations for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// A user's bookings, most recent check-in first
    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> Result<(Vec<Booking>, u64), DomainError>;

    /// All bookings, most recent check-in first
    async fn list_all(&self, pagination: &Pagination) -> Result<(Vec<Booking>, u64), DomainError>;

    /// Insert a booking
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - A non-cancelled booking of the same room overlaps
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Versioned write. When the booking still blocks the room, the overlap
    /// check runs against every other booking of the room.
    async fn update(&self, booking: Booking, expected_version: i64)
        -> Result<Booking, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Whether `[check_in, check_out)` is free, ignoring cancelled bookings
    /// and the booking named by `exclude`
    async fn is_room_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError>;

    /// Bookings of any status referencing the room
    async fn count_by_room(&self, room_id: Uuid) -> Result<u64, DomainError>;

    /// Bookings of any status made by the user
    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DomainError>;
}
