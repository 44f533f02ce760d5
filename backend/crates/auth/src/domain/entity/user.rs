//! User Entity
//!
//! One record type for every kind of account. The kind-specific data lives
//! in [`UserProfile`], and the role is derived from it.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// Access level granting super-admin privileges
pub const SUPER_ADMIN_ACCESS_LEVEL: &str = "SUPER_ADMIN";

/// Kind-specific account data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserProfile {
    /// Ticket buyer
    Buyer,
    /// Event organizer
    Organizer { organization_name: Option<String> },
    /// Platform administrator
    Admin {
        permissions: Option<String>,
        access_level: Option<String>,
    },
}

impl UserProfile {
    /// Build the profile for a role, keeping only the fields that role carries
    pub fn for_role(
        role: UserRole,
        organization_name: Option<String>,
        permissions: Option<String>,
        access_level: Option<String>,
    ) -> Self {
        match role {
            UserRole::Buyer => Self::Buyer,
            UserRole::Organizer => Self::Organizer { organization_name },
            UserRole::Admin => Self::Admin {
                permissions,
                access_level,
            },
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Self::Buyer => UserRole::Buyer,
            Self::Organizer { .. } => UserRole::Organizer,
            Self::Admin { .. } => UserRole::Admin,
        }
    }

    pub fn organization_name(&self) -> Option<&str> {
        match self {
            Self::Organizer { organization_name } => organization_name.as_deref(),
            _ => None,
        }
    }

    pub fn permissions(&self) -> Option<&str> {
        match self {
            Self::Admin { permissions, .. } => permissions.as_deref(),
            _ => None,
        }
    }

    pub fn access_level(&self) -> Option<&str> {
        match self {
            Self::Admin { access_level, .. } => access_level.as_deref(),
            _ => None,
        }
    }
}

/// Data needed to create a user; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub phone_number: Option<String>,
    pub password: UserPassword,
    pub profile: UserProfile,
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Display name
    pub name: UserName,
    /// Unique (case-insensitive) login email
    pub email: Email,
    pub phone_number: Option<String>,
    /// Argon2id hash; never leaves the domain
    pub password: UserPassword,
    pub status: UserStatus,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Materialize a new user with the id the store assigned
    pub fn from_new(user_id: UserId, new: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            name: new.name,
            email: new.email,
            phone_number: new.phone_number,
            password: new.password,
            status: UserStatus::Active,
            profile: new.profile,
            created_at,
            last_login_at: None,
        }
    }

    #[inline]
    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    /// Check if user can login
    #[inline]
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Admin whose access level is `SUPER_ADMIN`
    pub fn is_super_admin(&self) -> bool {
        self.profile.access_level() == Some(SUPER_ADMIN_ACCESS_LEVEL)
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    /// Move to a new status
    ///
    /// `Deleted` is terminal.
    pub fn change_status(&mut self, next: UserStatus) -> AuthResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AuthError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Update organization name
    ///
    /// Returns `false` (and changes nothing) unless the user is an organizer.
    pub fn set_organization_name(&mut self, name: String) -> bool {
        match &mut self.profile {
            UserProfile::Organizer { organization_name } => {
                *organization_name = Some(name);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use platform::password::HashCost;

    fn user(profile: UserProfile) -> User {
        let password = UserPassword::from_raw(
            &RawPassword::new("Pw1!".to_string()).unwrap(),
            None,
            HashCost::testing(),
        )
        .unwrap();
        let new = NewUser {
            name: UserName::new("Alice").unwrap(),
            email: Email::new("alice@example.com").unwrap(),
            phone_number: None,
            password,
            profile,
        };
        User::from_new(UserId::from_i64(1), new, Utc::now())
    }

    #[test]
    fn test_role_follows_profile() {
        assert_eq!(user(UserProfile::Buyer).role(), UserRole::Buyer);
        assert_eq!(
            user(UserProfile::Organizer {
                organization_name: None
            })
            .role(),
            UserRole::Organizer
        );
        assert_eq!(
            user(UserProfile::for_role(UserRole::Admin, None, None, None)).role(),
            UserRole::Admin
        );
    }

    #[test]
    fn test_for_role_drops_foreign_fields() {
        let profile = UserProfile::for_role(
            UserRole::Buyer,
            Some("Acme".into()),
            Some("ALL".into()),
            Some("SUPER_ADMIN".into()),
        );
        assert_eq!(profile, UserProfile::Buyer);

        let profile = UserProfile::for_role(UserRole::Organizer, Some("Acme".into()), None, None);
        assert_eq!(profile.organization_name(), Some("Acme"));
        assert_eq!(profile.access_level(), None);
    }

    #[test]
    fn test_new_user_is_active() {
        let u = user(UserProfile::Buyer);
        assert_eq!(u.status, UserStatus::Active);
        assert!(u.can_login());
        assert!(u.last_login_at.is_none());
    }

    #[test]
    fn test_super_admin() {
        let admin = user(UserProfile::Admin {
            permissions: None,
            access_level: Some("SUPER_ADMIN".into()),
        });
        assert!(admin.is_super_admin());

        let plain = user(UserProfile::Admin {
            permissions: None,
            access_level: Some("STANDARD".into()),
        });
        assert!(!plain.is_super_admin());
        assert!(!user(UserProfile::Buyer).is_super_admin());
    }

    #[test]
    fn test_deleted_is_terminal() {
        let mut u = user(UserProfile::Buyer);
        u.change_status(UserStatus::Suspended).unwrap();
        u.change_status(UserStatus::Deleted).unwrap();
        assert!(matches!(
            u.change_status(UserStatus::Active),
            Err(AuthError::InvalidStatusTransition { .. })
        ));
        assert_eq!(u.status, UserStatus::Deleted);
    }

    #[test]
    fn test_organization_name_only_for_organizers() {
        let mut buyer = user(UserProfile::Buyer);
        assert!(!buyer.set_organization_name("Acme".into()));
        assert_eq!(buyer.profile, UserProfile::Buyer);

        let mut organizer = user(UserProfile::Organizer {
            organization_name: None,
        });
        assert!(organizer.set_organization_name("Acme".into()));
        assert_eq!(organizer.profile.organization_name(), Some("Acme"));
    }
}
