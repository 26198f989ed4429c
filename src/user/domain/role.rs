//! Free-text user role label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role label assigned when none is supplied.
const DEFAULT_ROLE: &str = "User";

/// Free-text role label for a user, defaulting to `"User"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRole(String);

impl UserRole {
    /// Creates a role label. Blank input yields the default role.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self(trimmed.to_owned())
    }

    /// Creates a role label from an optional value.
    #[must_use]
    pub fn from_optional(value: Option<String>) -> Self {
        value.map_or_else(Self::default, Self::new)
    }

    /// Returns the role label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self(DEFAULT_ROLE.to_owned())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
