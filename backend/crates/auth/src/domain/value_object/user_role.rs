use serde::{Serialize, Serializer};
use std::fmt;

/// Role derived from the user's profile variant
///
/// Never stored on its own: `users.user_type` is the discriminator and the
/// role follows from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum UserRole {
    Buyer = 0,
    Organizer = 1,
    Admin = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Authority string carried in tokens and responses
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Buyer => "ROLE_BUYER",
            Organizer => "ROLE_ORGANIZER",
            Admin => "ROLE_ADMIN",
        }
    }

    /// Name accepted as `userType` at registration
    #[inline]
    pub const fn user_type(&self) -> &'static str {
        use UserRole::*;
        match self {
            Buyer => "BUYER",
            Organizer => "ORGANIZER",
            Admin => "ADMIN",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            0 => Some(Buyer),
            1 => Some(Organizer),
            2 => Some(Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "ROLE_BUYER" => Some(Buyer),
            "ROLE_ORGANIZER" => Some(Organizer),
            "ROLE_ADMIN" => Some(Admin),
            _ => None,
        }
    }

    /// Parse a registration `userType`, case-insensitively
    pub fn from_user_type(user_type: &str) -> Option<Self> {
        use UserRole::*;
        [Buyer, Organizer, Admin]
            .into_iter()
            .find(|role| role.user_type().eq_ignore_ascii_case(user_type.trim()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::Buyer));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Organizer));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(9), None);
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("ROLE_BUYER"), Some(UserRole::Buyer));
        assert_eq!(UserRole::from_code("ROLE_ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("admin"), None);
    }

    #[test]
    fn test_user_type_is_case_insensitive() {
        assert_eq!(UserRole::from_user_type("buyer"), Some(UserRole::Buyer));
        assert_eq!(UserRole::from_user_type("Organizer"), Some(UserRole::Organizer));
        assert_eq!(UserRole::from_user_type("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_user_type("GUEST"), None);
        assert_eq!(UserRole::from_user_type(""), None);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Buyer.to_string(), "ROLE_BUYER");
        assert_eq!(UserRole::Organizer.to_string(), "ROLE_ORGANIZER");
        assert_eq!(UserRole::Admin.to_string(), "ROLE_ADMIN");
    }
}
