//! Validated email address type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

/// Syntactically valid email address, trimmed but otherwise kept as given.
///
/// Uniqueness is case-insensitive: `Ada@Example.com` and `ada@example.com`
/// address the same user. Use [`EmailAddress::same_address`] to compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyEmail`] when the value is blank, or
    /// [`UserDomainError::InvalidEmail`] when it is not a valid address.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyEmail);
        }
        if !trimmed.validate_email() {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns whether both values address the same mailbox, ignoring case.
    #[must_use]
    pub fn same_address(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
