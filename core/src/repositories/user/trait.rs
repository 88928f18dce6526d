//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and returns `DomainError` so that storage
//! backends stay behind the domain boundary.

use async_trait::async_trait;
use hb_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use hb_core::repositories::UserRepository;
/// use hb_core::domain::entities::user::User;
/// use hb_core::errors::DomainError;
///
/// struct PostgresUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PostgresUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, user: User, expected_version: i64) -> Result<User, DomainError> { Ok(user) }
/// #   async fn delete(&self, id: Uuid) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn list(&self, pagination: &hb_shared::Pagination) -> Result<(Vec<User>, u64), DomainError> { Ok((vec![], 0)) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email address (already normalized by the caller)
    ///
    /// # Example
    /// ```no_run
    /// # use hb_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_email("guest@example.com").await? {
    ///     Some(user) => println!("User found: {:?}", user.id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - The email address is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    ///
    /// The write only succeeds while the stored version still equals
    /// `expected_version`; the stored version is then incremented and the
    /// returned user carries the new version.
    ///
    /// # Returns
    /// * `Err(DomainError::PreconditionFailed)` - Someone else updated the user first
    /// * `Err(DomainError::NotFound)` - The user no longer exists
    async fn update(&self, user: User, expected_version: i64) -> Result<User, DomainError>;

    /// Delete a user; `Ok(false)` when no such user exists
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// One page of users ordered by creation time, plus the total count
    async fn list(&self, pagination: &Pagination) -> Result<(Vec<User>, u64), DomainError>;

    /// Check whether an email address is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
