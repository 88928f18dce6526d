//! Column decoding and error mapping shared by the MySQL repositories

use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Decode, MySqlPool, Row, Type};
use uuid::Uuid;

use hb_core::errors::DomainError;

/// Read a column, turning decode failures into `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::internal(format!("Invalid {}: {}", name, e)))
}

/// Read a text column holding one of the entity enums
pub(crate) fn enum_column<E>(row: &MySqlRow, name: &str) -> Result<E, DomainError>
where
    E: std::str::FromStr<Err = String>,
{
    let raw: String = column(row, name)?;
    raw.parse().map_err(DomainError::internal)
}

/// Map a query failure; unique-key violations become `Conflict(message)`
pub(crate) fn write_error(err: sqlx::Error, conflict_message: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::conflict(conflict_message);
        }
    }
    query_error(err)
}

pub(crate) fn query_error(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "Database query failed");
    DomainError::internal(format!("Database query failed: {}", err))
}

/// Resolve a versioned UPDATE that touched no row into the matching error
pub(crate) async fn version_conflict(
    pool: &MySqlPool,
    table: &'static str,
    resource: &'static str,
    id: Uuid,
    expected_version: i64,
) -> DomainError {
    let sql = format!("SELECT version FROM {} WHERE id = ?", table);
    match sqlx::query_scalar::<_, i64>(&sql)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
    {
        Ok(Some(actual)) => DomainError::PreconditionFailed {
            expected: expected_version,
            actual,
        },
        Ok(None) => DomainError::not_found(resource),
        Err(e) => query_error(e),
    }
}

/// Convert a `COUNT(*)` result
pub(crate) fn count(value: i64) -> u64 {
    value.max(0) as u64
}
