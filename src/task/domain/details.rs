//! Task read models with explicitly requested relations.

use super::TaskItem;
use crate::project::domain::Project;
use crate::user::domain::User;
use serde::{Deserialize, Serialize};

/// Relations to populate when reading tasks.
///
/// The default loads nothing beyond the task row itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskInclude {
    project: bool,
    assignee: bool,
}

impl TaskInclude {
    /// Loads no relations.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            project: false,
            assignee: false,
        }
    }

    /// Loads both the project and the assignee.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            project: true,
            assignee: true,
        }
    }

    /// Adds the owning project.
    #[must_use]
    pub const fn with_project(mut self) -> Self {
        self.project = true;
        self
    }

    /// Adds the assigned user.
    #[must_use]
    pub const fn with_assignee(mut self) -> Self {
        self.assignee = true;
        self
    }

    /// Returns whether the project is requested.
    #[must_use]
    pub const fn project(self) -> bool {
        self.project
    }

    /// Returns whether the assignee is requested.
    #[must_use]
    pub const fn assignee(self) -> bool {
        self.assignee
    }
}

/// A task together with the relations requested by a [`TaskInclude`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Task row.
    pub task: TaskItem,
    /// Owning project, when requested.
    pub project: Option<Project>,
    /// Assigned user, when requested and the task is assigned.
    pub assignee: Option<User>,
}

impl TaskDetails {
    /// Wraps a task with no relations loaded.
    #[must_use]
    pub const fn bare(task: TaskItem) -> Self {
        Self {
            task,
            project: None,
            assignee: None,
        }
    }
}
