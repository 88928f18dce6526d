//! Main authentication service implementation

use hb_shared::utils::validation::{
    is_valid_e164_phone, is_valid_email, length_between, mask_email, normalize_email,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpChannel, OtpPurpose};
use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::cache::{user_key, ServiceCache};
use crate::services::token::TokenService;
use crate::services::verification::VerificationService;

use super::config::AuthServiceConfig;
use super::password::{validate_password_strength, PasswordHasher};

const MAX_NAME_LENGTH: usize = 100;

/// Input for [`AuthService::register`]
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    /// Channel for the verification code; the configured default when absent
    pub channel: Option<OtpChannel>,
}

/// Outcome of a registration. The account exists even if the code could
/// not be delivered; the user can ask for a new one.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub channel: OtpChannel,
    pub code_sent: bool,
}

/// A logged-in user and their tokens
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

/// Authentication service for managing the complete account flow
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    verification: Arc<VerificationService>,
    cache: ServiceCache,
    hasher: PasswordHasher,
    config: AuthServiceConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<TokenService>,
        verification: Arc<VerificationService>,
        cache: ServiceCache,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            verification,
            cache,
            hasher: PasswordHasher::new(config.bcrypt_cost),
            config,
        }
    }

    pub fn hasher(&self) -> PasswordHasher {
        self.hasher
    }

    /// Create an unverified account and send it an email-verification code
    pub async fn register(&self, input: RegisterUser) -> DomainResult<Registration> {
        if !self.config.allow_registration {
            return Err(DomainError::business_rule("Registration is disabled"));
        }

        let email = normalize_email(&input.email);
        validate_registration(&email, &input)?;

        let channel = input.channel.unwrap_or(self.config.default_channel);
        if channel == OtpChannel::WhatsApp && input.phone_number.is_none() {
            return Err(DomainError::validation(
                "A phone number is required for WhatsApp delivery",
            ));
        }
        if !self.verification.supports(channel) {
            return Err(DomainError::Auth(AuthError::ChannelUnavailable {
                channel: channel.to_string(),
            }));
        }

        if self.users.exists_by_email(&email).await? {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = User::new(
            email,
            password_hash,
            input.first_name.trim().to_string(),
            input.last_name.trim().to_string(),
            input.phone_number,
        );

        let user = self.users.create(user).await.map_err(|e| match e {
            DomainError::Conflict { .. } => DomainError::Auth(AuthError::EmailAlreadyRegistered),
            other => other,
        })?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            event = "user_registered",
            "New account registered"
        );

        let code_sent = match self
            .send_code(&user, OtpPurpose::EmailVerification, channel)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    "Verification code not sent after registration"
                );
                false
            }
        };

        Ok(Registration {
            user,
            channel,
            code_sent,
        })
    }

    /// Confirm the email address with the code. Unknown and already verified
    /// addresses get the same invalid-code answer, since neither has a live
    /// code.
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<User> {
        let email = normalize_email(email);
        let user = match self.users.find_by_email(&email).await? {
            Some(user) if !user.is_email_verified => user,
            _ => return Err(self.invalid_code()),
        };

        self.verification
            .verify_code(&email, OtpPurpose::EmailVerification, code)
            .await?;

        let mut verified = user.clone();
        verified.verify_email();
        let verified = self.users.update(verified, user.version).await?;
        self.cache.invalidate(&[user_key(verified.id)]).await;

        tracing::info!(user_id = %verified.id, event = "email_verified", "Email verified");
        Ok(verified)
    }

    /// Send a new verification code. Unknown and already verified
    /// addresses succeed silently.
    pub async fn resend_verification(
        &self,
        email: &str,
        channel: Option<OtpChannel>,
    ) -> DomainResult<()> {
        let email = normalize_email(email);
        let user = match self.users.find_by_email(&email).await? {
            Some(user) if !user.is_email_verified => user,
            _ => {
                tracing::debug!(email = %mask_email(&email), "Resend skipped");
                return Ok(());
            }
        };

        let channel = channel.unwrap_or(self.config.default_channel);
        self.send_code(&user, OtpPurpose::EmailVerification, channel)
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::warn!(
                user_id = %user.id,
                event = "login_failed",
                "Wrong password"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !user.is_email_verified {
            return Err(DomainError::Auth(AuthError::EmailNotVerified));
        }

        let tokens = self.tokens.generate_tokens(&user).await?;
        tracing::info!(user_id = %user.id, event = "login", "User logged in");
        Ok(AuthSession { user, tokens })
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let stored = self.tokens.verify_refresh_token(refresh_token).await?;
        let user = self
            .users
            .find_by_id(stored.user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        self.tokens.rotate_refresh_token(refresh_token, &user).await
    }

    /// Revoke the presented access token and every refresh token of its user
    pub async fn logout(&self, claims: &Claims) -> DomainResult<()> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        self.tokens.revoke_access_token(claims).await?;
        self.tokens.revoke_user_tokens(user_id).await?;

        tracing::info!(user_id = %user_id, event = "logout", "User logged out");
        Ok(())
    }

    /// Send a password-reset code. Never reveals whether the account exists:
    /// once the address is looked up, every outcome is a silent success.
    pub async fn forgot_password(&self, email: &str, channel: Option<OtpChannel>) -> DomainResult<()> {
        let channel = channel.unwrap_or(self.config.default_channel);
        if !self.verification.supports(channel) {
            return Err(DomainError::Auth(AuthError::ChannelUnavailable {
                channel: channel.to_string(),
            }));
        }

        let email = normalize_email(email);
        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email = %mask_email(&email), "Password reset for unknown address");
                return Ok(());
            }
        };

        if let Err(e) = self
            .send_code(&user, OtpPurpose::PasswordReset, channel)
            .await
        {
            tracing::warn!(
                user_id = %user.id,
                channel = %channel,
                error = %e,
                event = "password_reset_code_not_sent",
                "Password reset code not sent"
            );
        }
        Ok(())
    }

    /// Set a new password with a reset code; signs out all sessions
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        validate_password_strength(new_password)?;

        let email = normalize_email(email);
        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(self.invalid_code()),
        };

        self.verification
            .verify_code(&email, OtpPurpose::PasswordReset, code)
            .await?;

        self.replace_password(user, new_password).await?;
        tracing::info!(event = "password_reset", email = %mask_email(&email), "Password reset");
        Ok(())
    }

    pub async fn change_password(&self, user_id: Uuid, input: ChangePassword) -> DomainResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !self
            .hasher
            .verify(&input.current_password, &user.password_hash)
            .await?
        {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }
        validate_password_strength(&input.new_password)?;
        if input.current_password == input.new_password {
            return Err(DomainError::validation(
                "New password must differ from the current one",
            ));
        }

        self.replace_password(user, &input.new_password).await?;
        tracing::info!(user_id = %user_id, event = "password_changed", "Password changed");
        Ok(())
    }

    /// Verify a bearer token and load its account as it is now.
    ///
    /// Role and verification status are taken from the account rather than
    /// the token, so a role change applies on the next request. A token of a
    /// deleted account is treated as revoked.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<(Claims, User)> {
        let claims = self.tokens.verify_access_token(access_token).await?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        let key = user_key(user_id);
        if let Some(user) = self.cache.get_json::<User>(&key).await {
            return Ok((claims, user));
        }
        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::info!(user_id = %user_id, jti = %claims.jti, "Token of a deleted account");
            DomainError::Token(TokenError::TokenRevoked)
        })?;
        self.cache.set_json(&key, &user).await;
        Ok((claims, user))
    }

    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    async fn replace_password(&self, user: User, new_password: &str) -> DomainResult<()> {
        let hash = self.hasher.hash(new_password).await?;
        let expected_version = user.version;
        let mut updated = user;
        updated.set_password_hash(hash);
        let updated = self.users.update(updated, expected_version).await?;

        self.cache.invalidate(&[user_key(updated.id)]).await;
        self.tokens.revoke_user_tokens(updated.id).await?;
        Ok(())
    }

    async fn send_code(
        &self,
        user: &User,
        purpose: OtpPurpose,
        channel: OtpChannel,
    ) -> DomainResult<()> {
        let destination = match channel {
            OtpChannel::Email => user.email.clone(),
            OtpChannel::WhatsApp => user.phone_number.clone().ok_or_else(|| {
                DomainError::validation("A phone number is required for WhatsApp delivery")
            })?,
        };

        self.verification
            .send_code(&user.email, &destination, purpose, channel)
            .await
            .map(|_| ())
    }

    fn invalid_code(&self) -> DomainError {
        DomainError::Auth(AuthError::InvalidVerificationCode {
            remaining_attempts: self.verification.config().max_attempts,
        })
    }
}

fn validate_registration(email: &str, input: &RegisterUser) -> DomainResult<()> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail.into());
    }
    for (field, value) in [
        ("first_name", &input.first_name),
        ("last_name", &input.last_name),
    ] {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::RequiredField {
                field: field.to_string(),
            }
            .into());
        }
        if !length_between(value, 1, MAX_NAME_LENGTH) {
            return Err(ValidationError::InvalidLength {
                field: field.to_string(),
                max: MAX_NAME_LENGTH,
                actual: value.chars().count(),
            }
            .into());
        }
    }
    if let Some(phone) = &input.phone_number {
        if !is_valid_e164_phone(phone) {
            return Err(AuthError::InvalidPhoneFormat {
                phone: phone.clone(),
            }
            .into());
        }
    }
    validate_password_strength(&input.password)?;
    Ok(())
}
