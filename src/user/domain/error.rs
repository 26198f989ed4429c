//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The user name exceeds the 100-character storage limit.
    #[error("user name exceeds 100 character limit: {0}")]
    NameTooLong(String),

    /// The email address is empty after trimming.
    #[error("email address must not be empty")]
    EmptyEmail,

    /// The email address is not syntactically valid.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}
