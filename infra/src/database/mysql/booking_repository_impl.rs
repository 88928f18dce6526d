//! MySQL implementation of the BookingRepository trait.
//!
//! Writes that hold a room run in one transaction: the room row is locked
//! with `SELECT ... FOR UPDATE`, the overlap check runs, then the booking is
//! written. Concurrent writers for the same room queue on that lock, so two
//! overlapping stays can never both commit.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};
use uuid::Uuid;

use hb_core::domain::entities::booking::Booking;
use hb_core::errors::DomainError;
use hb_core::repositories::BookingRepository;
use hb_shared::Pagination;

use super::row::{column, count, enum_column, query_error, uuid_column, version_conflict};

const BOOKING_COLUMNS: &str = "id, user_id, room_id, check_in, check_out, guests, \
                               total_price_cents, status, version, created_at, updated_at";

const OVERLAP_SQL: &str = r#"
    SELECT COUNT(*) FROM bookings
    WHERE room_id = ?
      AND status <> 'cancelled'
      AND check_in < ?
      AND ? < check_out
      AND (? IS NULL OR id <> ?)
"#;

pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &MySqlRow) -> Result<Booking, DomainError> {
        Ok(Booking {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            room_id: uuid_column(row, "room_id")?,
            check_in: column(row, "check_in")?,
            check_out: column(row, "check_out")?,
            guests: column(row, "guests")?,
            total_price_cents: column(row, "total_price_cents")?,
            status: enum_column(row, "status")?,
            version: column(row, "version")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn page(
        &self,
        user_id: Option<Uuid>,
        pagination: &Pagination,
    ) -> Result<(Vec<Booking>, u64), DomainError> {
        let user = user_id.map(|id| id.to_string());
        let query = format!(
            r#"
            SELECT {} FROM bookings
            WHERE (? IS NULL OR user_id = ?)
            ORDER BY check_in DESC, id ASC
            LIMIT ? OFFSET ?
            "#,
            BOOKING_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(&user)
            .bind(&user)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE (? IS NULL OR user_id = ?)")
                .bind(&user)
                .bind(&user)
                .fetch_one(&self.pool)
                .await
                .map_err(query_error)?;

        let bookings = rows
            .iter()
            .map(Self::row_to_booking)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((bookings, count(total)))
    }

    /// Lock the room row for the rest of the transaction
    async fn lock_room(tx: &mut Transaction<'_, MySql>, room_id: Uuid) -> Result<(), DomainError> {
        let locked: Option<String> = sqlx::query_scalar("SELECT id FROM rooms WHERE id = ? FOR UPDATE")
            .bind(room_id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(query_error)?;

        match locked {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Room")),
        }
    }

    async fn overlapping(
        tx: &mut Transaction<'_, MySql>,
        booking: &Booking,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let exclude = exclude.map(|id| id.to_string());
        let overlaps: i64 = sqlx::query_scalar(OVERLAP_SQL)
            .bind(booking.room_id.to_string())
            .bind(booking.check_out)
            .bind(booking.check_in)
            .bind(&exclude)
            .bind(&exclude)
            .fetch_one(&mut **tx)
            .await
            .map_err(query_error)?;

        Ok(overlaps > 0)
    }
}

fn overlap_conflict() -> DomainError {
    DomainError::conflict("Room is already booked for the requested dates")
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let query = format!("SELECT {} FROM bookings WHERE id = ? LIMIT 1", BOOKING_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_booking).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> Result<(Vec<Booking>, u64), DomainError> {
        self.page(Some(user_id), pagination).await
    }

    async fn list_all(&self, pagination: &Pagination) -> Result<(Vec<Booking>, u64), DomainError> {
        self.page(None, pagination).await
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        if booking.blocks_room() {
            Self::lock_room(&mut tx, booking.room_id).await?;
            if Self::overlapping(&mut tx, &booking, None).await? {
                tracing::info!(room_id = %booking.room_id, "Booking rejected: dates overlap");
                return Err(overlap_conflict());
            }
        }

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, room_id, check_in, check_out, guests,
                total_price_cents, status, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id.to_string())
        .bind(booking.user_id.to_string())
        .bind(booking.room_id.to_string())
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.guests)
        .bind(booking.total_price_cents)
        .bind(booking.status.as_str())
        .bind(booking.version)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;
        Ok(booking)
    }

    async fn update(
        &self,
        mut booking: Booking,
        expected_version: i64,
    ) -> Result<Booking, DomainError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        if booking.blocks_room() {
            Self::lock_room(&mut tx, booking.room_id).await?;
            if Self::overlapping(&mut tx, &booking, Some(booking.id)).await? {
                return Err(overlap_conflict());
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                check_in = ?,
                check_out = ?,
                guests = ?,
                total_price_cents = ?,
                status = ?,
                version = version + 1,
                updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.guests)
        .bind(booking.total_price_cents)
        .bind(booking.status.as_str())
        .bind(now)
        .bind(booking.id.to_string())
        .bind(expected_version)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(query_error)?;
            return Err(version_conflict(
                &self.pool,
                "bookings",
                "Booking",
                booking.id,
                expected_version,
            )
            .await);
        }

        tx.commit().await.map_err(query_error)?;

        booking.version = expected_version + 1;
        booking.updated_at = now;
        Ok(booking)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_room_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let exclude = exclude.map(|id| id.to_string());
        let overlaps: i64 = sqlx::query_scalar(OVERLAP_SQL)
            .bind(room_id.to_string())
            .bind(check_out)
            .bind(check_in)
            .bind(&exclude)
            .bind(&exclude)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(overlaps == 0)
    }

    async fn count_by_room(&self, room_id: Uuid) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = ?")
            .bind(room_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(count(total))
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(count(total))
    }
}
