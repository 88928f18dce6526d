//! In-memory [`TokenRepository`]: refresh tokens keyed by hash and the
//! revocation list keyed by `jti`, behind one lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, RevokedToken};
use crate::errors::DomainError;

use super::trait_::TokenRepository;

#[derive(Default)]
struct Tables {
    refresh: HashMap<String, RefreshToken>,
    revoked: HashMap<String, RevokedToken>,
}

#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.refresh.contains_key(&token.token_hash) {
            return Err(DomainError::conflict("Refresh token already stored"));
        }
        tables.refresh.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.tables.read().await.refresh.get(token_hash).cloned())
    }

    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let Some(token) = tables.refresh.get_mut(token_hash) else {
            return Ok(false);
        };
        if token.is_revoked {
            return Ok(false);
        }
        token.revoke();
        Ok(true)
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tables = self.tables.write().await;
        let active = tables
            .refresh
            .values_mut()
            .filter(|t| t.user_id == user_id && !t.is_revoked);
        let mut count = 0;
        for token in active {
            token.revoke();
            count += 1;
        }
        Ok(count)
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.refresh.len();
        tables.refresh.retain(|_, t| !t.is_expired());
        Ok(before - tables.refresh.len())
    }

    async fn revoke_access_token(
        &self,
        jti: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.revoked.contains_key(jti) {
            return Ok(false);
        }
        tables.revoked.insert(
            jti.to_string(),
            RevokedToken::new(jti.to_string(), user_id, expires_at),
        );
        Ok(true)
    }

    async fn is_access_token_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        Ok(self.tables.read().await.revoked.contains_key(jti))
    }

    async fn cleanup_revoked(&self) -> Result<usize, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.revoked.len();
        tables.revoked.retain(|_, r| !r.is_expired());
        Ok(before - tables.revoked.len())
    }
}
