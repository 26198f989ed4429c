//! `PostgreSQL` integration tests for constraint mapping and cascades.

use super::helpers::{PgDesk, unique_email};
use chrono::Utc;
use projectdesk::{
    error::ErrorKind,
    project::{
        domain::ProjectInclude,
        ports::ProjectRepositoryError,
        services::{ProjectRegistryError, ProjectRequest},
    },
    task::domain::TaskInclude,
    user::{
        domain::UserId,
        ports::UserRepositoryError,
        services::{CreateUserRequest, UserDirectoryError},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_maps_to_conflict() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let email = unique_email("ada");
    desk.users
        .create(CreateUserRequest::new("Ada", email.clone()))
        .await?;

    let result = desk
        .users
        .create(CreateUserRequest::new("Ada", email.to_uppercase()))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(UserDirectoryError::Repository(UserRepositoryError::DuplicateEmail(_)))
        ),
        "expected duplicate email, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_owner_maps_to_not_found() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };

    let result = desk
        .projects
        .create(
            ProjectRequest::new("Orphan", Utc::now()),
            UserId::new(i64::MAX),
        )
        .await;

    let Err(err) = result else {
        return Err(eyre::eyre!("unknown owner should be rejected"));
    };
    eyre::ensure!(err.kind() == ErrorKind::NotFound, "expected not found, got {err}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_member_maps_to_conflict() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    let member = desk.user("Grace").await?;
    let project = desk.project(&owner, "Launch").await?;
    desk.projects
        .add_member(project.id(), member.id(), None)
        .await?;

    let result = desk
        .projects
        .add_member(project.id(), member.id(), None)
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(ProjectRegistryError::Repository(
                ProjectRepositoryError::DuplicateMember { .. }
            ))
        ),
        "expected duplicate member, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_listing_is_deduplicated() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    let project = desk.project(&owner, "Launch").await?;
    desk.projects
        .add_member(project.id(), owner.id(), None)
        .await?;

    let listed = desk
        .projects
        .list_for_user(owner.id(), ProjectInclude::none())
        .await?;

    eyre::ensure!(listed.len() == 1, "project should be listed once");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_delete_is_restricted() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    desk.project(&owner, "Launch").await?;

    let result = desk.users.delete(owner.id()).await;

    let Err(err) = result else {
        return Err(eyre::eyre!("owner deletion should be rejected"));
    };
    eyre::ensure!(err.kind() == ErrorKind::Conflict, "expected conflict, got {err}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_delete_cascades_and_user_delete_clears_assignee() -> Result<(), eyre::Report> {
    let Some(desk) = PgDesk::connect()? else {
        return Ok(());
    };
    let owner = desk.user("Ada").await?;
    let helper = desk.user("Grace").await?;
    let kept = desk.project(&owner, "Kept").await?;
    let removed = desk.project(&owner, "Removed").await?;
    let kept_task = desk.task(&kept, "Stay").await?;
    let removed_task = desk.task(&removed, "Go").await?;
    desk.tasks.assign(kept_task.id(), Some(helper.id())).await?;
    desk.projects
        .add_member(kept.id(), helper.id(), None)
        .await?;

    desk.projects.delete(removed.id()).await?;
    desk.users.delete(helper.id()).await?;

    let removed_lookup = desk
        .tasks
        .get_by_id(removed_task.id(), TaskInclude::none())
        .await;
    eyre::ensure!(
        removed_lookup.is_err_and(|err| err.kind() == ErrorKind::NotFound),
        "task should cascade with its project"
    );
    let kept_details = desk.tasks.get_by_id(kept_task.id(), TaskInclude::none()).await?;
    eyre::ensure!(kept_details.task.assignee_id().is_none(), "assignee cleared");
    let members = desk
        .projects
        .get_by_id(kept.id(), ProjectInclude::none().with_members())
        .await?
        .members;
    eyre::ensure!(members == Some(Vec::new()), "membership cascaded");
    Ok(())
}
