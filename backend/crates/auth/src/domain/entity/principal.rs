//! Principal
//!
//! The authenticated identity of a request, reconstructed from token claims.
//! Passed explicitly to every use case that needs an actor.

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl Principal {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Deny unless the principal has `role`
    pub fn require_role(&self, role: UserRole) -> AuthResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Deny unless the principal is `target` or an admin
    pub fn require_self_or_admin(&self, target: UserId) -> AuthResult<()> {
        if self.user_id == target || self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
