//! In-memory integration tests for referential rules across aggregates.

use super::helpers::{Desk, desk};
use projectdesk::{
    error::ErrorKind,
    project::domain::ProjectInclude,
    task::domain::TaskInclude,
    user::ports::UserRepositoryError,
    user::services::UserDirectoryError,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_project_removes_tasks_and_members(desk: Desk) -> Result<(), eyre::Report> {
    let owner = desk.user("Ada").await?;
    let member = desk.user("Grace").await?;
    let project = desk.project(&owner, "Launch").await?;
    let task = desk.task(&project, "Plan").await?;
    desk.tasks.assign(task.id(), Some(member.id())).await?;
    desk.projects
        .add_member(project.id(), member.id(), None)
        .await?;

    desk.projects.delete(project.id()).await?;

    let task_lookup = desk.tasks.get_by_id(task.id(), TaskInclude::none()).await;
    eyre::ensure!(
        task_lookup.is_err_and(|err| err.kind() == ErrorKind::NotFound),
        "task should be removed with its project"
    );
    let remaining = desk
        .tasks
        .list_for_project(project.id(), TaskInclude::none())
        .await?;
    eyre::ensure!(remaining.is_empty(), "project tasks should be removed");
    let visible = desk
        .projects
        .list_for_user(member.id(), ProjectInclude::none())
        .await?;
    eyre::ensure!(visible.is_empty(), "membership should be removed");
    let assigned = desk
        .tasks
        .list_for_user(member.id(), TaskInclude::none())
        .await?;
    eyre::ensure!(assigned.is_empty(), "no tasks remain for the member");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_owner_is_rejected(desk: Desk) -> Result<(), eyre::Report> {
    let owner = desk.user("Ada").await?;
    let project = desk.project(&owner, "Launch").await?;

    let result = desk.users.delete(owner.id()).await;

    let Err(err) = result else {
        return Err(eyre::eyre!("owner deletion should be rejected"));
    };
    eyre::ensure!(
        matches!(
            err,
            UserDirectoryError::Repository(UserRepositoryError::OwnsProjects(_))
        ),
        "unexpected error {err}"
    );
    eyre::ensure!(err.kind() == ErrorKind::Conflict, "expected conflict");
    desk.users.get_by_id(owner.id()).await?;
    desk.projects
        .get_by_id(project.id(), ProjectInclude::none())
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_assignee_clears_assignment(desk: Desk) -> Result<(), eyre::Report> {
    let owner = desk.user("Ada").await?;
    let helper = desk.user("Grace").await?;
    let project = desk.project(&owner, "Launch").await?;
    let task = desk.task(&project, "Plan").await?;
    desk.tasks.assign(task.id(), Some(helper.id())).await?;
    desk.projects
        .add_member(project.id(), helper.id(), None)
        .await?;

    desk.users.delete(helper.id()).await?;

    let details = desk.tasks.get_by_id(task.id(), TaskInclude::all()).await?;
    eyre::ensure!(details.task.assignee_id().is_none(), "assignee cleared");
    eyre::ensure!(details.assignee.is_none(), "no assignee to load");
    let project_details = desk
        .projects
        .get_by_id(project.id(), ProjectInclude::none().with_members())
        .await?;
    eyre::ensure!(
        project_details.members == Some(Vec::new()),
        "membership removed with the user"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_can_leave_after_project_removal(desk: Desk) -> Result<(), eyre::Report> {
    let owner = desk.user("Ada").await?;
    let project = desk.project(&owner, "Launch").await?;

    desk.projects.delete(project.id()).await?;
    desk.users.delete(owner.id()).await?;

    let remaining = desk.users.list_all().await?;
    eyre::ensure!(remaining.is_empty(), "user should be removed");
    Ok(())
}
