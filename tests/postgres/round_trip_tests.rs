//! `PostgreSQL` integration tests for persistence and relation loading.

use super::helpers::PgDesk;
use chrono::{Duration, Utc};
use projectdesk::{
    project::{domain::ProjectInclude, services::ProjectRequest},
    task::{
        domain::{TaskInclude, TaskPriority, TaskStatus},
        services::CreateTaskRequest,
    },
    user::services::UpdateUserRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_round_trip() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let ada = desk.user("Ada").await?;

    let fetched = desk.users.get_by_id(ada.id()).await?;
    eyre::ensure!(fetched == ada, "stored user should match");

    let shouted = ada.email().as_str().to_uppercase();
    let updated = desk
        .users
        .update(
            ada.id(),
            UpdateUserRequest::new("Ada King", shouted.as_str(), "Lead"),
        )
        .await?;
    let refetched = desk.users.get_by_id(ada.id()).await?;
    eyre::ensure!(refetched == updated, "update should persist");
    eyre::ensure!(
        refetched.email().as_str() == shouted,
        "email should keep its submitted case"
    );
    eyre::ensure!(
        refetched.created_at() == ada.created_at(),
        "created_at should be preserved"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_updates_clear_end_date() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    let project = desk
        .projects
        .create(
            ProjectRequest::new("Launch", Utc::now())
                .with_description("first cut")
                .with_end_date(Utc::now() + Duration::days(10)),
            owner.id(),
        )
        .await?;

    desk.projects
        .update(project.id(), ProjectRequest::new("Launch", project.start_date()))
        .await?;

    let details = desk
        .projects
        .get_by_id(project.id(), ProjectInclude::none())
        .await?;
    eyre::ensure!(details.project.end_date().is_none(), "end date cleared");
    eyre::ensure!(details.project.description().is_empty(), "description replaced");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_include_loads_relations() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    let member = desk.user("Grace").await?;
    let project = desk.project(&owner, "Launch").await?;
    let first = desk.task(&project, "Plan").await?;
    let second = desk
        .tasks
        .create(
            project.id(),
            CreateTaskRequest::new("Build")
                .with_priority(TaskPriority::High)
                .with_assignee(member.id()),
        )
        .await?;
    desk.projects
        .add_member(project.id(), member.id(), None)
        .await?;

    let details = desk
        .projects
        .get_by_id(project.id(), ProjectInclude::all())
        .await?;

    eyre::ensure!(details.owner == Some(owner), "owner loaded");
    eyre::ensure!(
        details.tasks == Some(vec![first, second.clone()]),
        "tasks loaded in id order"
    );
    let members = details.members.unwrap_or_default();
    eyre::ensure!(
        members.iter().map(|loaded| &loaded.user).eq([&member]),
        "member user loaded"
    );

    let task_details = desk.tasks.get_by_id(second.id(), TaskInclude::all()).await?;
    eyre::ensure!(task_details.assignee == Some(member), "assignee loaded");
    eyre::ensure!(
        task_details.project.map(|loaded| loaded.id()) == Some(project.id()),
        "project loaded"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_time_is_persisted_once() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    let project = desk.project(&owner, "Launch").await?;
    let task = desk.task(&project, "Ship").await?;

    let done = desk.tasks.update_status(task.id(), TaskStatus::Done).await?;
    desk.tasks
        .update_status(task.id(), TaskStatus::InProgress)
        .await?;

    let stored = desk.tasks.get_by_id(task.id(), TaskInclude::none()).await?;
    eyre::ensure!(stored.task.status() == TaskStatus::InProgress, "status stored");
    eyre::ensure!(
        stored.task.completed_at().is_some(),
        "completed_at should survive reopening"
    );
    eyre::ensure!(
        stored.task.completed_at().map(|at| at.timestamp_micros())
            == done.completed_at().map(|at| at.timestamp_micros()),
        "completed_at should not change"
    );
    Ok(())
}
