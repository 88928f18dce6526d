//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::cleanup::CleanupReport;
use super::config::TokenServiceConfig;

const REFRESH_TOKEN_LENGTH: usize = 32;

/// Service for managing JWT tokens and refresh tokens
pub struct TokenService {
    repository: Arc<dyn TokenRepository>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(repository: Arc<dyn TokenRepository>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    pub async fn generate_tokens(&self, user: &User) -> Result<TokenPair, DomainError> {
        let claims = Claims::new_access_token(
            user,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_ttl,
        );
        let access_token = self.encode_jwt(&claims)?;
        let refresh_token = self.generate_refresh_token(user.id).await?;

        tracing::debug!(user_id = %user.id, jti = %claims.jti, "Issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl,
        ))
    }

    /// Generates a refresh token and stores its hash
    async fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let token_string = random_token(REFRESH_TOKEN_LENGTH);
        let token_hash = self.hash_token(&token_string);
        let refresh_token = RefreshToken::new(user_id, token_hash, self.config.refresh_token_ttl);

        self.repository
            .save_refresh_token(refresh_token)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to store refresh token");
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        Ok(token_string)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Signature, issuer, audience, `exp` and `nbf` are checked, then the
    /// revocation list. A failing revocation lookup rejects the token.
    pub async fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                    ErrorKind::ImmatureSignature => {
                        DomainError::Token(TokenError::TokenNotYetValid)
                    }
                    ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        DomainError::Token(TokenError::InvalidClaims)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;
        let claims = token_data.claims;

        let revoked = self
            .repository
            .is_access_token_revoked(&claims.jti)
            .await
            .map_err(|e| {
                tracing::error!(jti = %claims.jti, error = %e, "Revocation lookup failed");
                DomainError::Token(TokenError::TokenRevoked)
            })?;
        if revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(claims)
    }

    /// Verifies a refresh token and returns the stored record
    pub async fn verify_refresh_token(&self, token: &str) -> Result<RefreshToken, DomainError> {
        let token_hash = self.hash_token(token);
        let stored = self
            .repository
            .find_refresh_token(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if stored.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }
        if stored.is_expired() {
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        Ok(stored)
    }

    /// Exchanges a refresh token for a new pair, revoking the old one.
    ///
    /// Concurrent rotations of the same token race on the revoke; only the
    /// caller that flips it gets a new pair.
    pub async fn rotate_refresh_token(
        &self,
        refresh_token: &str,
        user: &User,
    ) -> Result<TokenPair, DomainError> {
        let stored = self.verify_refresh_token(refresh_token).await?;
        if stored.user_id != user.id {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        if !self
            .repository
            .revoke_refresh_token(&stored.token_hash)
            .await?
        {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        self.generate_tokens(user).await
    }

    /// Puts the access token described by `claims` on the revocation list
    pub async fn revoke_access_token(&self, claims: &Claims) -> Result<bool, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        let expires_at = claims
            .expires_at()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;

        let inserted = self
            .repository
            .revoke_access_token(&claims.jti, user_id, expires_at)
            .await?;
        tracing::info!(user_id = %user_id, jti = %claims.jti, newly_revoked = inserted, "Access token revoked");
        Ok(inserted)
    }

    /// Revokes a single refresh token
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, DomainError> {
        let token_hash = self.hash_token(token);
        self.repository.revoke_refresh_token(&token_hash).await
    }

    /// Revokes all refresh tokens for a user
    pub async fn revoke_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let count = self.repository.revoke_all_user_tokens(user_id).await?;
        tracing::info!(user_id = %user_id, count = count, "Revoked refresh tokens");
        Ok(count)
    }

    /// Deletes expired refresh tokens and revocation-list rows
    pub async fn cleanup_expired(&self) -> Result<CleanupReport, DomainError> {
        Ok(CleanupReport {
            refresh_tokens: self.repository.delete_expired_tokens().await?,
            revocations: self.repository.cleanup_revoked().await?,
        })
    }

    /// Hashes a token for secure storage
    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn random_token(len: usize) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
