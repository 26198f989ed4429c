//! [`TaskRepository`] implementation for the in-memory store.

use super::InMemoryStore;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{NewTask, TaskDetails, TaskId, TaskInclude, TaskItem},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskItem> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(TaskRepositoryError::ProjectNotFound(task.project_id()));
        }
        if let Some(assignee_id) = task.assignee_id()
            && !state.users.contains_key(&assignee_id)
        {
            return Err(TaskRepositoryError::AssigneeNotFound(assignee_id));
        }

        let id = state.next_task_id();
        let stored = task.clone().with_id(id);
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &TaskItem) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        if let Some(assignee_id) = task.assignee_id()
            && !state.users.contains_key(&assignee_id)
        {
            return Err(TaskRepositoryError::AssigneeNotFound(assignee_id));
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Option<TaskDetails>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .get(&id)
            .map(|task| state.task_details(task, include)))
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Vec<TaskDetails>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .map(|task| state.task_details(task, include))
            .collect())
    }

    async fn list_for_assignee(
        &self,
        user_id: UserId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Vec<TaskDetails>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.assignee_id() == Some(user_id))
            .map(|task| state.task_details(task, include))
            .collect())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.remove(&id).is_some())
    }
}
