//! Project membership rows.

use super::{MemberId, ProjectId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role label assigned when none is supplied.
const DEFAULT_ROLE: &str = "Member";

/// Free-text membership role, defaulting to `"Member"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberRole(String);

impl MemberRole {
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

    /// Returns the role label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        Self(DEFAULT_ROLE.to_owned())
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A membership that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectMember {
    project_id: ProjectId,
    user_id: UserId,
    role: MemberRole,
    joined_at: DateTime<Utc>,
}

impl NewProjectMember {
    /// Creates a membership stamped with the current clock time.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at: clock.utc(),
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the membership role.
    #[must_use]
    pub const fn role(&self) -> &MemberRole {
        &self.role
    }

    /// Returns the join timestamp.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Binds the store-generated identifier, producing the stored membership.
    #[must_use]
    pub fn with_id(self, id: MemberId) -> ProjectMember {
        ProjectMember {
            id,
            project_id: self.project_id,
            user_id: self.user_id,
            role: self.role,
            joined_at: self.joined_at,
        }
    }
}

/// Membership granting a non-owner user access to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    id: MemberId,
    project_id: ProjectId,
    user_id: UserId,
    role: MemberRole,
    joined_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMemberData {
    /// Persisted membership identifier.
    pub id: MemberId,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted user reference.
    pub user_id: UserId,
    /// Persisted role label.
    pub role: MemberRole,
    /// Persisted join timestamp.
    pub joined_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMemberData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            user_id: data.user_id,
            role: data.role,
            joined_at: data.joined_at,
        }
    }

    /// Returns the membership identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the membership role.
    #[must_use]
    pub const fn role(&self) -> &MemberRole {
        &self.role
    }

    /// Returns the join timestamp.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
