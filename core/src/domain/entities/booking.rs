//! Booking entity and its status lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::StayDates;

/// Lifecycle of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

/// A reservation of one room for `[check_in, check_out)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    /// nights * nightly rate at the time of booking
    pub total_price_cents: i64,
    pub status: BookingStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_id: Uuid,
        room_id: Uuid,
        stay: StayDates,
        guests: u32,
        total_price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            room_id,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            guests,
            total_price_cents,
            status: BookingStatus::Confirmed,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether this booking holds the room, i.e. takes part in overlap checks
    pub fn blocks_room(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Half-open interval overlap with `[check_in, check_out)`
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, d).unwrap()
    }

    fn booking(from: u32, to: u32) -> Booking {
        let stay = StayDates::new(date(from), date(to)).unwrap();
        Booking::new(Uuid::new_v4(), Uuid::new_v4(), stay, 2, 10_000)
    }

    #[test]
    fn test_half_open_overlap() {
        let existing = booking(10, 13);
        assert!(existing.overlaps(date(12), date(15)));
        assert!(existing.overlaps(date(8), date(11)));
        assert!(existing.overlaps(date(11), date(12)));
        // back-to-back stays share the changeover day
        assert!(!existing.overlaps(date(13), date(15)));
        assert!(!existing.overlaps(date(7), date(10)));
    }

    #[test]
    fn test_cancelled_does_not_block() {
        let mut existing = booking(10, 13);
        assert!(existing.blocks_room());
        existing.cancel();
        assert!(!existing.blocks_room());
        assert_eq!(existing.nights(), 3);
    }
}
