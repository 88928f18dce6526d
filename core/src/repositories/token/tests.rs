//! Unit tests for mock token repository implementation

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;
use crate::repositories::token::{MockTokenRepository, TokenRepository};

async fn usable(repo: &MockTokenRepository, hash: &str) -> bool {
    repo.find_refresh_token(hash)
        .await
        .unwrap()
        .is_some_and(|t| t.is_valid())
}

#[tokio::test]
async fn test_save_and_find_refresh_token() {
    let repo = MockTokenRepository::new();
    let token = RefreshToken::new(Uuid::new_v4(), "test_hash".to_string(), 3600);

    let saved = repo.save_refresh_token(token.clone()).await.unwrap();
    assert_eq!(saved.id, token.id);

    let found = repo.find_refresh_token("test_hash").await.unwrap().unwrap();
    assert_eq!(found.user_id, token.user_id);
    assert!(usable(&repo, "test_hash").await);
}

#[tokio::test]
async fn test_duplicate_token() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.save_refresh_token(RefreshToken::new(user_id, "same".to_string(), 60))
        .await
        .unwrap();

    let result = repo
        .save_refresh_token(RefreshToken::new(user_id, "same".to_string(), 60))
        .await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_revoke_is_single_use() {
    let repo = MockTokenRepository::new();
    repo.save_refresh_token(RefreshToken::new(Uuid::new_v4(), "h".to_string(), 60))
        .await
        .unwrap();

    assert!(repo.revoke_refresh_token("h").await.unwrap());
    assert!(!repo.revoke_refresh_token("h").await.unwrap());
    assert!(!repo.revoke_refresh_token("unknown").await.unwrap());
    assert!(!usable(&repo, "h").await);
}

#[tokio::test]
async fn test_revoke_all_user_tokens() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    for i in 0..3 {
        repo.save_refresh_token(RefreshToken::new(user_id, format!("t{}", i), 60))
            .await
            .unwrap();
    }
    repo.save_refresh_token(RefreshToken::new(Uuid::new_v4(), "other".to_string(), 60))
        .await
        .unwrap();

    assert_eq!(repo.revoke_all_user_tokens(user_id).await.unwrap(), 3);
    assert!(usable(&repo, "other").await);
}

#[tokio::test]
async fn test_delete_expired_tokens() {
    let repo = MockTokenRepository::new();
    repo.save_refresh_token(RefreshToken::new(Uuid::new_v4(), "old".to_string(), -10))
        .await
        .unwrap();
    repo.save_refresh_token(RefreshToken::new(Uuid::new_v4(), "new".to_string(), 60))
        .await
        .unwrap();

    assert_eq!(repo.delete_expired_tokens().await.unwrap(), 1);
    assert!(repo.find_refresh_token("old").await.unwrap().is_none());
}

#[tokio::test]
async fn test_access_token_revocation_is_idempotent() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::minutes(15);

    assert!(!repo.is_access_token_revoked("jti-1").await.unwrap());
    assert!(repo.revoke_access_token("jti-1", user_id, expires_at).await.unwrap());
    assert!(!repo.revoke_access_token("jti-1", user_id, expires_at).await.unwrap());
    assert!(repo.is_access_token_revoked("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_cleanup_revoked_drops_expired_rows() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.revoke_access_token("gone", user_id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    repo.revoke_access_token("kept", user_id, Utc::now() + Duration::minutes(10))
        .await
        .unwrap();

    assert_eq!(repo.cleanup_revoked().await.unwrap(), 1);
    assert!(repo.is_access_token_revoked("kept").await.unwrap());
    assert!(!repo.is_access_token_revoked("gone").await.unwrap());
}
