//! Token repository trait covering refresh tokens and the access-token
//! revocation list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Refresh tokens are stored as SHA-256 hashes, never in plain text.
/// Revocation rows carry the expiry of the access token they block so they
/// can be purged once that token would have expired anyway.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use hb_core::repositories::TokenRepository;
    /// # use hb_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = RefreshToken::new(Uuid::new_v4(), "sha256_of_token".to_string(), 604800);
    /// let saved = repo.save_refresh_token(token).await?;
    /// assert_eq!(saved.token_hash, "sha256_of_token");
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    async fn find_refresh_token(&self, token_hash: &str)
        -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke one refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - The token was active and is now revoked
    /// * `Ok(false)` - Unknown or already revoked
    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke every active refresh token of a user, returning the count
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete expired refresh tokens
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;

    /// Add an access token to the revocation list.
    ///
    /// Looks the `jti` up first; revoking an already revoked token is a
    /// no-op that returns `Ok(false)`.
    async fn revoke_access_token(
        &self,
        jti: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Whether the access token with this `jti` has been revoked
    async fn is_access_token_revoked(&self, jti: &str) -> Result<bool, DomainError>;

    /// Drop revocation-list rows whose token has expired
    async fn cleanup_revoked(&self) -> Result<usize, DomainError>;
}
