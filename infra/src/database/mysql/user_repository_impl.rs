//! MySQL implementation of the UserRepository trait.
//!
//! Emails are stored lower-cased; the `users.email` column carries a unique
//! key so duplicate registrations surface as `Conflict`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use hb_core::domain::entities::user::User;
use hb_core::errors::DomainError;
use hb_core::repositories::UserRepository;
use hb_shared::Pagination;

use super::row::{column, count, enum_column, query_error, uuid_column, version_conflict, write_error};

const USER_COLUMNS: &str = "id, email, phone_number, password_hash, first_name, last_name, \
                            role, is_email_verified, version, created_at, updated_at";

const DUPLICATE_EMAIL: &str = "Email address already registered";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: uuid_column(row, "id")?,
            email: column(row, "email")?,
            phone_number: column(row, "phone_number")?,
            password_hash: column(row, "password_hash")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            role: enum_column(row, "role")?,
            is_email_verified: column(row, "is_email_verified")?,
            version: column(row, "version")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, phone_number, password_hash, first_name, last_name,
                role, is_email_verified, version, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(user.email.to_lowercase())
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .bind(user.is_email_verified)
            .bind(user.version)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, DUPLICATE_EMAIL))?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(user)
    }

    async fn update(&self, mut user: User, expected_version: i64) -> Result<User, DomainError> {
        let now = Utc::now();
        let query = r#"
            UPDATE users SET
                email = ?,
                phone_number = ?,
                password_hash = ?,
                first_name = ?,
                last_name = ?,
                role = ?,
                is_email_verified = ?,
                version = version + 1,
                updated_at = ?
            WHERE id = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(user.email.to_lowercase())
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.role.as_str())
            .bind(user.is_email_verified)
            .bind(now)
            .bind(user.id.to_string())
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, DUPLICATE_EMAIL))?;

        if result.rows_affected() == 0 {
            return Err(
                version_conflict(&self.pool, "users", "User", user.id, expected_version).await,
            );
        }

        user.version = expected_version + 1;
        user.updated_at = now;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<User>, u64), DomainError> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
            USER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let users = rows
            .iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((users, count(total)))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email.trim().to_lowercase())
                .fetch_one(&self.pool)
                .await
                .map_err(query_error)?;

        Ok(exists == 1)
    }
}
