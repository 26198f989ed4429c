//! Given steps for project workflow BDD scenarios.

use super::world::{ProjectWorkflowWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use projectdesk::{
    project::services::ProjectRequest, task::services::CreateTaskRequest,
    user::services::CreateUserRequest,
};
use rstest_bdd_macros::given;

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut ProjectWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let email = format!("{}@example.com", name.to_lowercase());
    let user = run_async(world.users.create(CreateUserRequest::new(name.clone(), email)))
        .wrap_err("register scenario user")?;
    world.registered.insert(name, user);
    Ok(())
}

#[given(r#"a project "{name}" owned by "{owner}""#)]
fn project_owned_by(
    world: &mut ProjectWorkflowWorld,
    name: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?.id();
    let project = run_async(
        world
            .projects
            .create(ProjectRequest::new(name, Utc::now()), owner_id),
    )
    .wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a task "{title}" in the project"#)]
fn task_in_project(world: &mut ProjectWorkflowWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.current_project()?.id();
    let task = run_async(world.tasks.create(project_id, CreateTaskRequest::new(title)))
        .wrap_err("create scenario task")?;
    world.task = Some(task);
    Ok(())
}
