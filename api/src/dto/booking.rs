use chrono::{DateTime, NaiveDate, Utc};
use hb_core::domain::entities::booking::{Booking, BookingStatus};
use hb_core::services::booking::{BookingChanges, NewBooking};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,

    #[validate(range(min = 1, max = 20))]
    pub guests: u32,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(request: CreateBookingRequest) -> Self {
        Self {
            room_id: request.room_id,
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
        }
    }
}

/// PATCH body. Date or guest changes re-check availability and reprice;
/// `status: completed` is admin only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,

    #[validate(range(min = 1, max = 20))]
    pub guests: Option<u32>,

    pub status: Option<BookingStatus>,
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(request: UpdateBookingRequest) -> Self {
        Self {
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            status: request.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guests: u32,
    pub total_price_cents: i64,
    pub status: BookingStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            nights: booking.nights(),
            id: booking.id,
            user_id: booking.user_id,
            room_id: booking.room_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            guests: booking.guests,
            total_price_cents: booking.total_price_cents,
            status: booking.status,
            version: booking.version,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
