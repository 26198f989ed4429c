//! In-memory integration tests for the user directory.

use super::helpers::{Desk, desk};
use projectdesk::{
    error::ErrorKind,
    user::{
        domain::UserId,
        services::{CreateUserRequest, UpdateUserRequest},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_users_are_retrievable(desk: Desk) -> Result<(), eyre::Report> {
    let ada = desk
        .users
        .create(CreateUserRequest::new("  Ada  ", " Ada.Lovelace@Example.com "))
        .await?;

    let fetched = desk.users.get_by_id(ada.id()).await?;

    eyre::ensure!(fetched.name().as_str() == "Ada", "name should be trimmed");
    eyre::ensure!(
        fetched.email().as_str() == "Ada.Lovelace@Example.com",
        "email should keep its submitted case"
    );
    eyre::ensure!(fetched.role().as_str() == "User", "role should default");
    eyre::ensure!(fetched.created_at() == ada.created_at(), "created_at mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_ids_increase(desk: Desk) -> Result<(), eyre::Report> {
    let first = desk.user("Ada").await?;
    let second = desk.user("Grace").await?;

    eyre::ensure!(first.id() < second.id(), "ids should increase");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_a_conflict(desk: Desk) -> Result<(), eyre::Report> {
    let first = desk.user("Ada").await?;

    let result = desk
        .users
        .create(CreateUserRequest::new("Ada Two", "ADA@Example.com"))
        .await;

    let Err(err) = result else {
        return Err(eyre::eyre!("duplicate email should be rejected"));
    };
    eyre::ensure!(err.kind() == ErrorKind::Conflict, "expected conflict, got {err}");
    let listed = desk.users.list_all().await?;
    eyre::ensure!(listed == vec![first], "first user should be the only user");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn email_can_move_to_another_user_after_change(desk: Desk) -> Result<(), eyre::Report> {
    let ada = desk.user("Ada").await?;
    desk.users
        .update(
            ada.id(),
            UpdateUserRequest::new("Ada", "countess@example.com", ""),
        )
        .await?;

    let grace = desk
        .users
        .create(CreateUserRequest::new("Grace", "ada@example.com"))
        .await?;

    eyre::ensure!(grace.email().as_str() == "ada@example.com", "email reused");
    let updated = desk.users.get_by_id(ada.id()).await?;
    eyre::ensure!(updated.role().as_str() == "User", "blank role should default");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_user_lookup_is_not_found(desk: Desk) -> Result<(), eyre::Report> {
    let result = desk.users.get_by_id(UserId::new(404)).await;

    let Err(err) = result else {
        return Err(eyre::eyre!("unknown user should not be found"));
    };
    eyre::ensure!(err.kind() == ErrorKind::NotFound, "expected not found");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_unknown_user_succeeds(desk: Desk) -> Result<(), eyre::Report> {
    desk.users.delete(UserId::new(404)).await?;
    Ok(())
}
