//! Booking rules: availability, pricing, ownership and status lifecycle

use chrono::{NaiveDate, Utc};
use hb_shared::Pagination;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::entities::room::Room;
use crate::domain::value_objects::{Actor, StayDates, VersionCheck};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{BookingRepository, RoomRepository};
use crate::services::cache::{booking_key, ServiceCache};

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub status: Option<BookingStatus>,
}

impl BookingChanges {
    fn touches_stay(&self) -> bool {
        self.check_in.is_some() || self.check_out.is_some() || self.guests.is_some()
    }
}

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    rooms: Arc<dyn RoomRepository>,
    cache: ServiceCache,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        rooms: Arc<dyn RoomRepository>,
        cache: ServiceCache,
    ) -> Self {
        Self {
            bookings,
            rooms,
            cache,
        }
    }

    /// Book a room for the caller.
    ///
    /// The price is fixed at booking time from the room's current rate. The
    /// overlap check and the insert are one atomic step in the repository.
    pub async fn create(&self, actor: &Actor, input: NewBooking) -> DomainResult<Booking> {
        let stay = StayDates::upcoming(input.check_in, input.check_out)?;
        let room = self.bookable_room(input.room_id).await?;
        check_guests(input.guests, &room)?;

        let booking = Booking::new(
            actor.user_id,
            room.id,
            stay,
            input.guests,
            room.price_for(stay.nights()),
        );
        let booking = self.bookings.create(booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            user_id = %booking.user_id,
            nights = stay.nights(),
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn get(&self, actor: &Actor, id: Uuid) -> DomainResult<Booking> {
        let key = booking_key(id);
        let booking = match self.cache.get_json::<Booking>(&key).await {
            Some(booking) => booking,
            None => {
                let booking = self.load(id).await?;
                self.cache.set_json(&key, &booking).await;
                booking
            }
        };
        actor.require_self_or_admin(booking.user_id)?;
        Ok(booking)
    }

    /// Admins see every booking, everyone else only their own
    pub async fn list(
        &self,
        actor: &Actor,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Booking>, u64)> {
        if actor.is_admin() {
            self.bookings.list_all(pagination).await
        } else {
            self.bookings.list_by_user(actor.user_id, pagination).await
        }
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: BookingChanges,
        precondition: Option<VersionCheck>,
    ) -> DomainResult<Booking> {
        let current = self.load(id).await?;
        actor.require_self_or_admin(current.user_id)?;
        VersionCheck::verify_optional(precondition, current.version)?;

        let mut booking = current.clone();

        if changes.touches_stay() {
            if current.status != BookingStatus::Confirmed {
                return Err(DomainError::business_rule(
                    "Only confirmed bookings can be modified",
                ));
            }

            let check_in = changes.check_in.unwrap_or(current.check_in);
            let check_out = changes.check_out.unwrap_or(current.check_out);
            let stay = if actor.is_admin() {
                StayDates::new(check_in, check_out)?
            } else {
                StayDates::upcoming(check_in, check_out)?
            };
            let guests = changes.guests.unwrap_or(current.guests);

            let room = self.bookable_room(current.room_id).await?;
            check_guests(guests, &room)?;

            booking.check_in = stay.check_in();
            booking.check_out = stay.check_out();
            booking.guests = guests;
            booking.total_price_cents = room.price_for(stay.nights());
        }

        if let Some(status) = changes.status {
            if status != current.status {
                apply_status(actor, &mut booking, status)?;
            }
        }

        if booking == current {
            return Ok(current);
        }

        booking.updated_at = Utc::now();
        let booking = self.bookings.update(booking, current.version).await?;
        self.cache.invalidate(&[booking_key(id)]).await;
        Ok(booking)
    }

    /// Cancel a confirmed booking. Guests cannot cancel a stay that has
    /// already started; admins can.
    pub async fn cancel(&self, actor: &Actor, id: Uuid) -> DomainResult<Booking> {
        let current = self.load(id).await?;
        actor.require_self_or_admin(current.user_id)?;

        let mut booking = current.clone();
        apply_status(actor, &mut booking, BookingStatus::Cancelled)?;

        let booking = self.bookings.update(booking, current.version).await?;
        self.cache.invalidate(&[booking_key(id)]).await;
        tracing::info!(booking_id = %id, actor = %actor.user_id, "Booking cancelled");
        Ok(booking)
    }

    /// Admins delete any booking; owners only their cancelled ones
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        let booking = self.load(id).await?;
        let allowed = actor.is_admin()
            || (booking.user_id == actor.user_id && booking.status == BookingStatus::Cancelled);
        if !allowed {
            return Err(DomainError::Forbidden);
        }

        self.bookings.delete(id).await?;
        self.cache.invalidate(&[booking_key(id)]).await;
        tracing::info!(booking_id = %id, actor = %actor.user_id, "Booking deleted");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> DomainResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking"))
    }

    async fn bookable_room(&self, room_id: Uuid) -> DomainResult<Room> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room"))?;
        if !room.is_active {
            return Err(DomainError::business_rule("Room is not open for booking"));
        }
        Ok(room)
    }
}

fn check_guests(guests: u32, room: &Room) -> DomainResult<()> {
    if guests < 1 || guests > room.capacity {
        return Err(ValidationError::OutOfRange {
            field: "guests".to_string(),
            min: "1".to_string(),
            max: room.capacity.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Confirmed → Cancelled (owner or admin) and Confirmed → Completed (admin).
/// Nothing leaves Cancelled or Completed.
fn apply_status(actor: &Actor, booking: &mut Booking, status: BookingStatus) -> DomainResult<()> {
    if booking.status != BookingStatus::Confirmed {
        return Err(DomainError::business_rule(format!(
            "A {} booking cannot change status",
            booking.status.as_str()
        )));
    }

    match status {
        BookingStatus::Confirmed => Ok(()),
        BookingStatus::Cancelled => {
            if !actor.is_admin() && booking.check_in < Utc::now().date_naive() {
                return Err(DomainError::business_rule(
                    "Bookings cannot be cancelled after check-in",
                ));
            }
            booking.cancel();
            Ok(())
        }
        BookingStatus::Completed => {
            actor.require_admin()?;
            booking.status = BookingStatus::Completed;
            booking.updated_at = Utc::now();
            Ok(())
        }
    }
}
