//! Email Value Object
//!
//! Represents a validated email address.
//! The spelling the user typed is kept for display; a lowercase canonical
//! form is used for uniqueness checks and lookups.

use serde::{Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,

    #[error("Email must be at most 254 characters")]
    TooLong,

    #[error("Email must be valid")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email {
    original: String,
    canonical: String,
}

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let original = email.into().trim().to_string();

        if original.is_empty() {
            return Err(EmailError::Empty);
        }

        if original.len() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong);
        }

        let canonical = original.to_lowercase();
        if !Self::is_valid_format(&canonical) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Basic email format validation
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if domain.contains('@') {
            return false;
        }

        if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }

        true
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }

    /// Get the email as entered
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for uniqueness and lookup
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Case-insensitive equality
    pub fn same_address(&self, other: &Email) -> bool {
        self.canonical == other.canonical
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.canonical.split('@').nth(1).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}
