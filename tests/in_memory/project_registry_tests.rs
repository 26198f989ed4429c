//! In-memory integration tests for the project registry.

use super::helpers::{Desk, desk};
use projectdesk::{
    error::ErrorKind,
    project::domain::{ProjectId, ProjectInclude, ProjectStatus},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_include_loads_owner_tasks_and_members(desk: Desk) -> Result<(), eyre::Report> {
    let owner = desk.user("Ada").await?;
    let member = desk.user("Grace").await?;
    let project = desk.project(&owner, "Launch").await?;
    let first = desk.task(&project, "Plan").await?;
    let second = desk.task(&project, "Build").await?;
    desk.projects
        .add_member(project.id(), member.id(), Some("Reviewer".to_owned()))
        .await?;

    let details = desk
        .projects
        .get_by_id(project.id(), ProjectInclude::all())
        .await?;

    eyre::ensure!(details.project.status() == ProjectStatus::Planning, "status");
    eyre::ensure!(details.owner.as_ref() == Some(&owner), "owner should load");
    eyre::ensure!(
        details.tasks == Some(vec![first, second]),
        "tasks should load in id order"
    );
    let members = details
        .members
        .ok_or_else(|| eyre::eyre!("members should load"))?;
    eyre::ensure!(members.len() == 1, "expected one member");
    let loaded = members
        .first()
        .ok_or_else(|| eyre::eyre!("missing member"))?;
    eyre::ensure!(loaded.user == member, "member user should resolve");
    eyre::ensure!(loaded.member.role().as_str() == "Reviewer", "member role");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_include_loads_no_relations(desk: Desk) -> Result<(), eyre::Report> {
    let owner = desk.user("Ada").await?;
    let project = desk.project(&owner, "Launch").await?;
    desk.task(&project, "Plan").await?;

    let details = desk
        .projects
        .get_by_id(project.id(), ProjectInclude::none())
        .await?;

    eyre::ensure!(details.owner.is_none(), "owner not requested");
    eyre::ensure!(details.tasks.is_none(), "tasks not requested");
    eyre::ensure!(details.members.is_none(), "members not requested");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_see_owned_and_joined_projects_only(desk: Desk) -> Result<(), eyre::Report> {
    let ada = desk.user("Ada").await?;
    let grace = desk.user("Grace").await?;
    let alan = desk.user("Alan").await?;
    let owned = desk.project(&ada, "Owned").await?;
    let joined = desk.project(&grace, "Joined").await?;
    desk.project(&alan, "Unrelated").await?;
    desk.projects.add_member(joined.id(), ada.id(), None).await?;

    let listed = desk
        .projects
        .list_for_user(ada.id(), ProjectInclude::none().with_owner())
        .await?;

    let ids: Vec<ProjectId> = listed.iter().map(|details| details.project.id()).collect();
    eyre::ensure!(ids == vec![owned.id(), joined.id()], "unexpected projects {ids:?}");
    let owners: Vec<_> = listed.iter().map(|details| details.owner.clone()).collect();
    eyre::ensure!(owners == vec![Some(ada), Some(grace)], "owners should load");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn membership_in_unknown_project_is_not_found(desk: Desk) -> Result<(), eyre::Report> {
    let user = desk.user("Ada").await?;

    let result = desk
        .projects
        .add_member(ProjectId::new(9), user.id(), None)
        .await;

    let Err(err) = result else {
        return Err(eyre::eyre!("unknown project should be rejected"));
    };
    eyre::ensure!(err.kind() == ErrorKind::NotFound, "expected not found");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_member_loses_project_visibility(desk: Desk) -> Result<(), eyre::Report> {
    let ada = desk.user("Ada").await?;
    let grace = desk.user("Grace").await?;
    let project = desk.project(&ada, "Launch").await?;
    desk.projects
        .add_member(project.id(), grace.id(), None)
        .await?;

    desk.projects
        .remove_member(project.id(), grace.id())
        .await?;

    let listed = desk
        .projects
        .list_for_user(grace.id(), ProjectInclude::none())
        .await?;
    eyre::ensure!(listed.is_empty(), "former member should see nothing");
    Ok(())
}
