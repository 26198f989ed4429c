//! Project read models with explicitly requested relations.

use super::{Project, ProjectMember};
use crate::task::domain::TaskItem;
use crate::user::domain::User;
use serde::{Deserialize, Serialize};

/// Relations to populate when reading a project.
///
/// The default loads nothing beyond the project row itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ProjectInclude {
    owner: bool,
    tasks: bool,
    members: bool,
}

impl ProjectInclude {
    /// Loads no relations.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            owner: false,
            tasks: false,
            members: false,
        }
    }

    /// Loads the owner, tasks, and members with their users.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            owner: true,
            tasks: true,
            members: true,
        }
    }

    /// Adds the owning user.
    #[must_use]
    pub const fn with_owner(mut self) -> Self {
        self.owner = true;
        self
    }

    /// Adds the project's tasks.
    #[must_use]
    pub const fn with_tasks(mut self) -> Self {
        self.tasks = true;
        self
    }

    /// Adds the membership rows, each resolved to its user.
    #[must_use]
    pub const fn with_members(mut self) -> Self {
        self.members = true;
        self
    }

    /// Returns whether the owner is requested.
    #[must_use]
    pub const fn owner(self) -> bool {
        self.owner
    }

    /// Returns whether tasks are requested.
    #[must_use]
    pub const fn tasks(self) -> bool {
        self.tasks
    }

    /// Returns whether members are requested.
    #[must_use]
    pub const fn members(self) -> bool {
        self.members
    }
}

/// Membership row paired with the user it grants access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetails {
    /// Membership row.
    pub member: ProjectMember,
    /// The member's user record.
    pub user: User,
}

/// A project together with the relations requested by a [`ProjectInclude`].
///
/// Each relation is `None` when it was not requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    /// Project row.
    pub project: Project,
    /// Owning user, when requested.
    pub owner: Option<User>,
    /// Tasks of the project in ascending identifier order, when requested.
    pub tasks: Option<Vec<TaskItem>>,
    /// Members in ascending membership order, when requested.
    pub members: Option<Vec<MemberDetails>>,
}

impl ProjectDetails {
    /// Wraps a project with no relations loaded.
    #[must_use]
    pub const fn bare(project: Project) -> Self {
        Self {
            project,
            owner: None,
            tasks: None,
            members: None,
        }
    }
}
