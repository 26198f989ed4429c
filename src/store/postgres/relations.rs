//! Batched loading of the relations requested by include sets.

use super::{
    models::{MemberRow, ProjectRow, TaskRow, UserRow},
    schema::{project_members, projects, tasks, users},
    store::ReadError,
};
use crate::project::domain::{MemberDetails, Project, ProjectDetails, ProjectInclude};
use crate::task::domain::{TaskDetails, TaskInclude, TaskItem};
use crate::user::domain::User;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::BTreeMap;

fn users_by_id(
    connection: &mut PgConnection,
    ids: Vec<i64>,
) -> Result<BTreeMap<i64, User>, ReadError> {
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let rows = users::table
        .filter(users::id.eq_any(ids))
        .select(UserRow::as_select())
        .load::<UserRow>(connection)?;
    rows.into_iter()
        .map(|row| -> Result<_, ReadError> { Ok((row.id, User::try_from(row)?)) })
        .collect()
}

fn projects_by_id(
    connection: &mut PgConnection,
    ids: Vec<i64>,
) -> Result<BTreeMap<i64, Project>, ReadError> {
    if ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let rows = projects::table
        .filter(projects::id.eq_any(ids))
        .select(ProjectRow::as_select())
        .load::<ProjectRow>(connection)?;
    rows.into_iter()
        .map(|row| -> Result<_, ReadError> { Ok((row.id, Project::try_from(row)?)) })
        .collect()
}

fn tasks_by_project(
    connection: &mut PgConnection,
    project_ids: Vec<i64>,
) -> Result<BTreeMap<i64, Vec<TaskItem>>, ReadError> {
    let rows = tasks::table
        .filter(tasks::project_id.eq_any(project_ids))
        .order(tasks::id.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)?;
    let mut grouped: BTreeMap<i64, Vec<TaskItem>> = BTreeMap::new();
    for row in rows {
        let project_id = row.project_id;
        grouped
            .entry(project_id)
            .or_default()
            .push(TaskItem::try_from(row)?);
    }
    Ok(grouped)
}

fn members_by_project(
    connection: &mut PgConnection,
    project_ids: Vec<i64>,
) -> Result<BTreeMap<i64, Vec<MemberDetails>>, ReadError> {
    let rows = project_members::table
        .filter(project_members::project_id.eq_any(project_ids))
        .order(project_members::id.asc())
        .select(MemberRow::as_select())
        .load::<MemberRow>(connection)?;
    let member_users = users_by_id(connection, rows.iter().map(|row| row.user_id).collect())?;

    let mut grouped: BTreeMap<i64, Vec<MemberDetails>> = BTreeMap::new();
    for row in rows {
        let Some(user) = member_users.get(&row.user_id).cloned() else {
            continue;
        };
        grouped.entry(row.project_id).or_default().push(MemberDetails {
            member: row.into(),
            user,
        });
    }
    Ok(grouped)
}

/// Rebuilds projects and attaches the relations named by `include`.
pub(super) fn project_details(
    connection: &mut PgConnection,
    rows: Vec<ProjectRow>,
    include: ProjectInclude,
) -> Result<Vec<ProjectDetails>, ReadError> {
    let project_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let owners = if include.owner() {
        users_by_id(connection, rows.iter().map(|row| row.owner_id).collect())?
    } else {
        BTreeMap::new()
    };
    let mut task_groups = if include.tasks() {
        tasks_by_project(connection, project_ids.clone())?
    } else {
        BTreeMap::new()
    };
    let mut member_groups = if include.members() {
        members_by_project(connection, project_ids)?
    } else {
        BTreeMap::new()
    };

    rows.into_iter()
        .map(|row| -> Result<_, ReadError> {
            let id = row.id;
            let owner_id = row.owner_id;
            let mut details = ProjectDetails::bare(Project::try_from(row)?);
            if include.owner() {
                details.owner = owners.get(&owner_id).cloned();
            }
            if include.tasks() {
                details.tasks = Some(task_groups.remove(&id).unwrap_or_default());
            }
            if include.members() {
                details.members = Some(member_groups.remove(&id).unwrap_or_default());
            }
            Ok(details)
        })
        .collect()
}

/// Rebuilds tasks and attaches the relations named by `include`.
pub(super) fn task_details(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
    include: TaskInclude,
) -> Result<Vec<TaskDetails>, ReadError> {
    let owning_projects = if include.project() {
        projects_by_id(connection, rows.iter().map(|row| row.project_id).collect())?
    } else {
        BTreeMap::new()
    };
    let assignees = if include.assignee() {
        users_by_id(connection, rows.iter().filter_map(|row| row.assignee_id).collect())?
    } else {
        BTreeMap::new()
    };

    rows.into_iter()
        .map(|row| -> Result<_, ReadError> {
            let project_id = row.project_id;
            let assignee_id = row.assignee_id;
            let mut details = TaskDetails::bare(TaskItem::try_from(row)?);
            if include.project() {
                details.project = owning_projects.get(&project_id).cloned();
            }
            if include.assignee() {
                details.assignee = assignee_id.and_then(|id| assignees.get(&id)).cloned();
            }
            Ok(details)
        })
        .collect()
}
