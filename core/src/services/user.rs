//! Account administration: profile reads, edits and removal

use hb_shared::utils::validation::{is_valid_e164_phone, length_between};
use hb_shared::Pagination;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::{Actor, VersionCheck};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{BookingRepository, ReviewRepository, UserRepository};
use crate::services::cache::{user_key, ServiceCache, REVIEWS_PREFIX};
use crate::services::token::TokenService;

const MAX_NAME_LENGTH: usize = 100;

/// Partial update; `None` leaves the field untouched.
/// An empty `phone_number` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    /// Admin only
    pub role: Option<UserRole>,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingRepository>,
    reviews: Arc<dyn ReviewRepository>,
    tokens: Arc<TokenService>,
    cache: ServiceCache,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingRepository>,
        reviews: Arc<dyn ReviewRepository>,
        tokens: Arc<TokenService>,
        cache: ServiceCache,
    ) -> Self {
        Self {
            users,
            bookings,
            reviews,
            tokens,
            cache,
        }
    }

    /// Read-through cached profile; the cached copy has no password hash
    pub async fn get(&self, actor: &Actor, id: Uuid) -> DomainResult<User> {
        actor.require_self_or_admin(id)?;

        let key = user_key(id);
        if let Some(user) = self.cache.get_json::<User>(&key).await {
            return Ok(user);
        }
        let user = self.load(id).await?;
        self.cache.set_json(&key, &user).await;
        Ok(user)
    }

    pub async fn list(&self, actor: &Actor, pagination: &Pagination) -> DomainResult<(Vec<User>, u64)> {
        actor.require_admin()?;
        self.users.list(pagination).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: UserChanges,
        precondition: Option<VersionCheck>,
    ) -> DomainResult<User> {
        actor.require_self_or_admin(id)?;
        if changes.role.is_some() {
            actor.require_admin()?;
        }

        let current = self.load(id).await?;
        VersionCheck::verify_optional(precondition, current.version)?;

        let mut user = current.clone();
        if let Some(first_name) = changes.first_name {
            user.first_name = checked_name("first_name", first_name)?;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = checked_name("last_name", last_name)?;
        }
        if let Some(phone) = changes.phone_number {
            let phone = phone.trim().to_string();
            if phone.is_empty() {
                user.phone_number = None;
            } else if is_valid_e164_phone(&phone) {
                user.phone_number = Some(phone);
            } else {
                return Err(AuthError::InvalidPhoneFormat { phone }.into());
            }
        }
        if let Some(role) = changes.role {
            user.set_role(role);
        }
        user.touch();

        let user = self.users.update(user, current.version).await?;
        self.cache.invalidate(&[user_key(id)]).await;
        Ok(user)
    }

    /// Accounts with bookings are kept; their reviews and sessions go with them
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.require_self_or_admin(id)?;
        self.load(id).await?;

        let bookings = self.bookings.count_by_user(id).await?;
        if bookings > 0 {
            return Err(DomainError::conflict(format!(
                "User has {} booking(s)",
                bookings
            )));
        }

        let reviews = self.reviews.delete_by_user(id).await?;
        self.tokens.revoke_user_tokens(id).await?;
        self.users.delete(id).await?;

        self.cache.invalidate(&[user_key(id)]).await;
        if reviews > 0 {
            self.cache.invalidate_prefix(REVIEWS_PREFIX).await;
        }
        tracing::info!(user_id = %id, actor = %actor.user_id, reviews_removed = reviews, "User deleted");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}

fn checked_name(field: &str, value: String) -> DomainResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    if !length_between(&value, 1, MAX_NAME_LENGTH) {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
            actual: value.chars().count(),
        }
        .into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestContext;

    #[tokio::test]
    async fn test_self_or_admin_read() {
        let ctx = TestContext::new();
        let me = ctx.seed_verified_guest().await;
        let other = ctx.seed_verified_guest().await;

        let user = ctx.users.get(&me, me.user_id).await.unwrap();
        assert_eq!(user.id, me.user_id);
        assert!(matches!(
            ctx.users.get(&other, me.user_id).await,
            Err(DomainError::Forbidden)
        ));
        ctx.users.get(&ctx.admin(), me.user_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_requires_admin() {
        let ctx = TestContext::new();
        let me = ctx.seed_verified_guest().await;
        assert!(matches!(
            ctx.users.list(&me, &Pagination::default()).await,
            Err(DomainError::Forbidden)
        ));
        let (_, total) = ctx
            .users
            .list(&ctx.admin(), &Pagination::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_update_profile_and_version() {
        let ctx = TestContext::new();
        let me = ctx.seed_verified_guest().await;
        let before = ctx.users.get(&me, me.user_id).await.unwrap();

        let updated = ctx
            .users
            .update(
                &me,
                me.user_id,
                UserChanges {
                    first_name: Some(" Grace ".to_string()),
                    phone_number: Some("+14155552671".to_string()),
                    ..UserChanges::default()
                },
                Some(VersionCheck::Exact(before.version)),
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Grace");
        assert_eq!(updated.version, before.version + 1);
        assert_eq!(
            ctx.users.get(&me, me.user_id).await.unwrap().first_name,
            "Grace"
        );

        let stale = ctx
            .users
            .update(
                &me,
                me.user_id,
                UserChanges::default(),
                Some(VersionCheck::Exact(before.version)),
            )
            .await;
        assert!(matches!(stale, Err(DomainError::PreconditionFailed { .. })));
    }

    #[tokio::test]
    async fn test_role_change_is_admin_only() {
        let ctx = TestContext::new();
        let me = ctx.seed_verified_guest().await;
        let promote = UserChanges {
            role: Some(UserRole::Manager),
            ..UserChanges::default()
        };

        assert!(matches!(
            ctx.users.update(&me, me.user_id, promote.clone(), None).await,
            Err(DomainError::Forbidden)
        ));
        let promoted = ctx
            .users
            .update(&ctx.admin(), me.user_id, promote, None)
            .await
            .unwrap();
        assert_eq!(promoted.role, UserRole::Manager);
    }

    #[tokio::test]
    async fn test_invalid_phone() {
        let ctx = TestContext::new();
        let me = ctx.seed_verified_guest().await;
        let result = ctx
            .users
            .update(
                &me,
                me.user_id,
                UserChanges {
                    phone_number: Some("12345".to_string()),
                    ..UserChanges::default()
                },
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidPhoneFormat { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_user_with_bookings_conflicts() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;
        let me = ctx.seed_verified_guest().await;
        ctx.book(&me, room.id, 2, 3).await;

        assert!(matches!(
            ctx.users.delete(&me, me.user_id).await,
            Err(DomainError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_user_removes_reviews() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let me = ctx.seed_verified_guest().await;
        ctx.reviews
            .create(
                &me,
                crate::services::review::NewReview {
                    hotel_id: hotel.id,
                    rating: 4,
                    comment: None,
                },
            )
            .await
            .unwrap();

        ctx.users.delete(&me, me.user_id).await.unwrap();
        assert!(ctx
            .review_repo
            .find_by_user_and_hotel(me.user_id, hotel.id)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            ctx.users.get(&ctx.admin(), me.user_id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
