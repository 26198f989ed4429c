//! Client-visible error taxonomy shared by every service.
//!
//! Each service error reports an [`ErrorKind`] so a transport adapter can map
//! failures onto its own outcomes without matching on service internals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a failed service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing or malformed.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// A uniqueness or referential constraint rejected the change.
    Conflict,
    /// The store failed or returned unreadable data.
    Store,
}

impl ErrorKind {
    /// Returns the canonical label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Store => "store",
        }
    }

    /// Returns whether the caller can correct the request and retry.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Store)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
