//! Service layer for task creation, lookup, status changes, assignment, and
//! removal.

use crate::error::ErrorKind;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        NewTask, TaskDetails, TaskDomainError, TaskId, TaskInclude, TaskItem, TaskPriority,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::UserId,
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: Option<TaskPriority>,
    due_date: Option<DateTime<Utc>>,
    assignee_id: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with a title and an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: None,
            due_date: None,
            assignee_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority. Without one the task gets medium priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

/// Service-level errors for task board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User lookup for assignment validation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

impl TaskBoardError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => match err {
                TaskRepositoryError::NotFound(_)
                | TaskRepositoryError::ProjectNotFound(_)
                | TaskRepositoryError::AssigneeNotFound(_) => ErrorKind::NotFound,
                TaskRepositoryError::InvalidPersistedData(_)
                | TaskRepositoryError::Persistence(_) => ErrorKind::Store,
            },
            Self::Users(err) => match err {
                UserRepositoryError::NotFound(_) => ErrorKind::NotFound,
                UserRepositoryError::DuplicateEmail(_) | UserRepositoryError::OwnsProjects(_) => {
                    ErrorKind::Conflict
                }
                UserRepositoryError::InvalidPersistedData(_)
                | UserRepositoryError::Persistence(_) => ErrorKind::Store,
            },
        }
    }
}

/// Result type for task board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Task board orchestration service.
///
/// Assignment changes are checked against the user repository before they
/// are persisted, so an unknown assignee is reported as not found even when
/// the store does not enforce the reference.
#[derive(Clone)]
pub struct TaskBoardService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, U, C> TaskBoardService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
        }
    }

    /// Creates a task in `project_id`, starting in [`TaskStatus::ToDo`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] when the title fails validation, or
    /// a wrapped [`TaskRepositoryError::ProjectNotFound`] /
    /// [`TaskRepositoryError::AssigneeNotFound`] when a reference is unknown.
    pub async fn create(
        &self,
        project_id: ProjectId,
        request: CreateTaskRequest,
    ) -> TaskBoardResult<TaskItem> {
        let CreateTaskRequest {
            title,
            description,
            priority,
            due_date,
            assignee_id,
        } = request;

        let mut new_task =
            NewTask::new(project_id, TaskTitle::new(title)?, description, &*self.clock)
                .with_priority(priority.unwrap_or_default());
        if let Some(due) = due_date {
            new_task = new_task.with_due_date(due);
        }
        if let Some(assignee) = assignee_id {
            new_task = new_task.with_assignee(assignee);
        }

        let task = self.tasks.insert(&new_task).await?;
        info!(task_id = %task.id(), project_id = %project_id, "task created");
        Ok(task)
    }

    /// Retrieves a task with the requested relations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when no task has
    /// the identifier.
    pub async fn get_by_id(
        &self,
        id: TaskId,
        include: TaskInclude,
    ) -> TaskBoardResult<TaskDetails> {
        self.tasks
            .find_by_id(id, include)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(id).into())
    }

    /// Lists every task of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Repository`] when persistence lookup fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        include: TaskInclude,
    ) -> TaskBoardResult<Vec<TaskDetails>> {
        Ok(self.tasks.list_for_project(project_id, include).await?)
    }

    /// Lists every task assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Repository`] when persistence lookup fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        include: TaskInclude,
    ) -> TaskBoardResult<Vec<TaskDetails>> {
        Ok(self.tasks.list_for_assignee(user_id, include).await?)
    }

    /// Moves a task to `status`.
    ///
    /// The first move to [`TaskStatus::Done`] stamps the completion time;
    /// later moves never clear it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist.
    pub async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskBoardResult<TaskItem> {
        let mut task = self.find_task_or_error(id).await?;
        let previous = task.status();
        task.change_status(status, &*self.clock);
        self.tasks.update(&task).await?;
        info!(
            task_id = %id,
            from = %previous,
            to = %status,
            completed_at = ?task.completed_at(),
            "task status changed"
        );
        Ok(task)
    }

    /// Assigns a task to a user, or unassigns it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist, or [`TaskRepositoryError::AssigneeNotFound`] (wrapped) when
    /// the assignee is not a registered user.
    pub async fn assign(
        &self,
        id: TaskId,
        assignee_id: Option<UserId>,
    ) -> TaskBoardResult<TaskItem> {
        let mut task = self.find_task_or_error(id).await?;
        if let Some(user_id) = assignee_id {
            self.ensure_user_exists(user_id).await?;
        }

        task.assign(assignee_id);
        self.tasks.update(&task).await?;
        match assignee_id {
            Some(user_id) => info!(task_id = %id, assignee_id = %user_id, "task assigned"),
            None => info!(task_id = %id, "task unassigned"),
        }
        Ok(task)
    }

    /// Removes a task. Removing an unknown task succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskBoardResult<()> {
        if self.tasks.delete(id).await? {
            info!(task_id = %id, "task deleted");
        } else {
            debug!(task_id = %id, "task already absent; delete is a no-op");
        }
        Ok(())
    }

    async fn find_task_or_error(&self, id: TaskId) -> TaskBoardResult<TaskItem> {
        self.get_by_id(id, TaskInclude::none())
            .await
            .map(|details| details.task)
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> TaskBoardResult<()> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(TaskRepositoryError::AssigneeNotFound(user_id).into());
        }
        Ok(())
    }
}
