//! User Status Value Object
//!
//! ## Design Decisions
//! - **Soft delete**: `Deleted` rows stay in the table and remain readable
//! - **Terminal state**: nothing transitions out of `Deleted`
//! - Only `Active` accounts can log in

use derive_more::Display;
use serde::{Serialize, Serializer};

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[repr(i16)]
pub enum UserStatus {
    /// Normal account - can login and use all features
    #[default]
    #[display("ACTIVE")]
    Active = 0,

    /// Suspended by an administrator - cannot login
    #[display("SUSPENDED")]
    Suspended = 1,

    /// Soft-deleted - cannot login, never physically removed
    #[display("DELETED")]
    Deleted = 2,
}

impl UserStatus {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Deleted => "DELETED",
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if this is a terminal state (cannot transition out)
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Whether `self -> next` is allowed
    #[inline]
    pub const fn can_transition_to(&self, next: UserStatus) -> bool {
        !self.is_terminal() || matches!(next, Self::Deleted)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Suspended),
            2 => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Create from string code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        [Self::Active, Self::Suspended, Self::Deleted]
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl Serialize for UserStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
