//! Repository port for task persistence and lookup.

use crate::project::domain::ProjectId;
use crate::task::domain::{NewTask, TaskDetails, TaskId, TaskInclude, TaskItem};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ProjectNotFound`] when the project does
    /// not exist or [`TaskRepositoryError::AssigneeNotFound`] when the
    /// assignee does not reference an existing user.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskItem>;

    /// Persists status, completion, and assignment changes to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::AssigneeNotFound`] when the assignee does not
    /// reference an existing user.
    async fn update(&self, task: &TaskItem) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, loading the requested relations.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(
        &self,
        id: TaskId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Option<TaskDetails>>;

    /// Returns every task of a project in ascending identifier order.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Vec<TaskDetails>>;

    /// Returns every task assigned to a user in ascending identifier order.
    async fn list_for_assignee(
        &self,
        user_id: UserId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Vec<TaskDetails>>;

    /// Removes a task.
    ///
    /// Returns `false` when no task had the identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The assignee does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
