//! Password hashing and strength rules

use crate::errors::{DomainError, DomainResult, ValidationError};

pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt ignores input past 72 bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// At least 8 characters, at most 72 bytes, with a letter and a digit
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword {
            reason: format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        });
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword {
            reason: format!("must be at most {} bytes", MAX_PASSWORD_LENGTH),
        });
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(ValidationError::WeakPassword {
            reason: "must contain a letter".to_string(),
        });
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::WeakPassword {
            reason: "must contain a digit".to_string(),
        });
    }
    Ok(())
}

/// bcrypt on the blocking pool, keeping the hash off the async workers
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    /// A malformed stored hash counts as a mismatch
    pub async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?;
        match verified {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("s3cretpass").is_ok());
        assert!(validate_password_strength("short1").is_err());
        assert!(validate_password_strength("lettersonly").is_err());
        assert!(validate_password_strength("1234567890").is_err());
        assert!(validate_password_strength(&format!("a1{}", "x".repeat(80))).is_err());
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("s3cretpass").await.unwrap();
        assert_ne!(hash, "s3cretpass");
        assert!(hasher.verify("s3cretpass", &hash).await.unwrap());
        assert!(!hasher.verify("wrongpass1", &hash).await.unwrap());
        assert!(!hasher.verify("s3cretpass", "not-a-hash").await.unwrap());
    }
}
