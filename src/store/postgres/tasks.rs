//! [`TaskRepository`] implementation for the `PostgreSQL` store.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    relations,
    schema::tasks,
    store::{PostgresStore, TASKS_ASSIGNEE_FKEY, TASKS_PROJECT_FKEY, violated_constraint},
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{NewTask, TaskDetails, TaskId, TaskInclude, TaskItem},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

#[async_trait]
impl TaskRepository for PostgresStore {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskItem> {
        let project_id = task.project_id();
        let assignee_id = task.assignee_id();
        let new_row = NewTaskRow::from(task);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| map_write_error(err, Some(project_id), assignee_id))?;
            TaskItem::try_from(row).map_err(TaskRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn update(&self, task: &TaskItem) -> TaskRepositoryResult<()> {
        let id = task.id();
        let assignee_id = task.assignee_id();
        let changeset = TaskChangeset::from(task);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| map_write_error(err, None, assignee_id))?;
            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Option<TaskDetails>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let details = relations::task_details(connection, rows, include)?;
            Ok(details.into_iter().next())
        })
        .await
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Vec<TaskDetails>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(relations::task_details(connection, rows, include)?)
        })
        .await
    }

    async fn list_for_assignee(
        &self,
        user_id: UserId,
        include: TaskInclude,
    ) -> TaskRepositoryResult<Vec<TaskDetails>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee_id.eq(user_id.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(relations::task_details(connection, rows, include)?)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted_count > 0)
        })
        .await
    }
}

fn map_write_error(
    err: DieselError,
    project_id: Option<ProjectId>,
    assignee_id: Option<UserId>,
) -> TaskRepositoryError {
    match (violated_constraint(&err), project_id, assignee_id) {
        (Some(TASKS_PROJECT_FKEY), Some(project), _) => {
            TaskRepositoryError::ProjectNotFound(project)
        }
        (Some(TASKS_ASSIGNEE_FKEY), _, Some(assignee)) => {
            TaskRepositoryError::AssigneeNotFound(assignee)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}
