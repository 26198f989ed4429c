//! Task aggregate root and its status lifecycle.

use super::{TaskId, TaskPriority, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A validated task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    title: TaskTitle,
    description: String,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assignee_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a new task in [`TaskStatus::ToDo`] stamped with the current
    /// clock time.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            title,
            description: description.into(),
            priority: TaskPriority::default(),
            due_date: None,
            assignee_id: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the initial status of every new task.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        TaskStatus::ToDo
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Binds the store-generated identifier, producing the stored task.
    #[must_use]
    pub fn with_id(self, id: TaskId) -> TaskItem {
        TaskItem {
            id,
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            status: TaskStatus::ToDo,
            priority: self.priority,
            created_at: self.created_at,
            due_date: self.due_date,
            completed_at: None,
            assignee_id: self.assignee_id,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    assignee_id: Option<UserId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted first-completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted assignee reference.
    pub assignee_id: Option<UserId>,
}

impl TaskItem {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            due_date: data.due_date,
            completed_at: data.completed_at,
            assignee_id: data.assignee_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns when the task first reached [`TaskStatus::Done`], if ever.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Moves the task to `status`.
    ///
    /// The first move to [`TaskStatus::Done`] records the completion time.
    /// Leaving `Done` later keeps that timestamp.
    pub fn change_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        if status == TaskStatus::Done && self.completed_at.is_none() {
            self.completed_at = Some(clock.utc());
        }
    }

    /// Sets or clears the assignee.
    pub const fn assign(&mut self, assignee_id: Option<UserId>) {
        self.assignee_id = assignee_id;
    }
}
