//! Validated check-in/check-out pair.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Longest stay accepted in one booking
pub const MAX_NIGHTS: i64 = 30;

/// Half-open stay interval `[check_in, check_out)` of at least one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::InvalidDateRange {
                reason: "check_out must be after check_in".to_string(),
            });
        }
        let nights = (check_out - check_in).num_days();
        if nights > MAX_NIGHTS {
            return Err(ValidationError::InvalidDateRange {
                reason: format!("stays are limited to {} nights", MAX_NIGHTS),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Like [`StayDates::new`], and rejects a check-in before today (UTC)
    pub fn upcoming(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_in < Utc::now().date_naive() {
            return Err(ValidationError::InvalidDateRange {
                reason: "check_in is in the past".to_string(),
            });
        }
        Self::new(check_in, check_out)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_rejects_empty_and_inverted_ranges() {
        let day = NaiveDate::from_ymd_opt(2030, 1, 10).unwrap();
        assert!(StayDates::new(day, day).is_err());
        assert!(StayDates::new(day, day - Duration::days(1)).is_err());
        assert_eq!(StayDates::new(day, day + Duration::days(2)).unwrap().nights(), 2);
    }

    #[test]
    fn test_rejects_long_stays() {
        let day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(StayDates::new(day, day + Duration::days(MAX_NIGHTS)).is_ok());
        assert!(StayDates::new(day, day + Duration::days(MAX_NIGHTS + 1)).is_err());
    }

    #[test]
    fn test_upcoming_rejects_past_check_in() {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        assert!(StayDates::upcoming(yesterday, yesterday + Duration::days(2)).is_err());

        let today = Utc::now().date_naive();
        assert!(StayDates::upcoming(today, today + Duration::days(1)).is_ok());
    }
}
