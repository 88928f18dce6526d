//! The authenticated caller on whose behalf a service operation runs.

use uuid::Uuid;

use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Admins and managers maintain cities, hotels and rooms
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Manager)
    }

    /// Owner of the resource, or an admin
    pub fn is_self_or_admin(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id || self.is_admin()
    }

    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }

    pub fn require_catalog_manager(&self) -> DomainResult<()> {
        if self.can_manage_catalog() {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }

    pub fn require_self_or_admin(&self, owner_id: Uuid) -> DomainResult<()> {
        if self.is_self_or_admin(owner_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let guest = Actor::new(Uuid::new_v4(), UserRole::Guest);
        let manager = Actor::new(Uuid::new_v4(), UserRole::Manager);
        let admin = Actor::new(Uuid::new_v4(), UserRole::Admin);

        assert!(guest.require_catalog_manager().is_err());
        assert!(manager.require_catalog_manager().is_ok());
        assert!(manager.require_admin().is_err());
        assert!(admin.require_self_or_admin(guest.user_id).is_ok());
        assert!(guest.require_self_or_admin(guest.user_id).is_ok());
        assert!(guest.require_self_or_admin(manager.user_id).is_err());
    }
}
