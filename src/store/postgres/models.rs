//! Diesel row models and their conversion into domain types.

use super::schema::{project_members, projects, tasks, users};
use crate::project::domain::{
    MemberId, MemberRole, NewProject, NewProjectMember, ParseProjectStatusError,
    PersistedMemberData, PersistedProjectData, Project, ProjectDomainError, ProjectId,
    ProjectMember, ProjectName, ProjectStatus,
};
use crate::task::domain::{
    NewTask, ParseTaskPriorityError, ParseTaskStatusError, PersistedTaskData, TaskDomainError,
    TaskId, TaskItem, TaskPriority, TaskStatus, TaskTitle,
};
use crate::user::domain::{
    EmailAddress, NewUser, PersistedUserData, User, UserDomainError, UserId, UserName, UserRole,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use thiserror::Error;

/// A persisted row failed domain validation.
#[derive(Debug, Error)]
pub enum RowConversionError {
    /// A user column failed validation.
    #[error(transparent)]
    User(#[from] UserDomainError),
    /// A project column failed validation.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// The project status column holds an unknown value.
    #[error(transparent)]
    ProjectStatus(#[from] ParseProjectStatusError),
    /// A task column failed validation.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// The task status column holds an unknown value.
    #[error(transparent)]
    TaskStatus(#[from] ParseTaskStatusError),
    /// The task priority column holds an unknown value.
    #[error(transparent)]
    TaskPriority(#[from] ParseTaskPriorityError),
}

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role label.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role label.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Update model for the editable user columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role label.
    pub role: String,
}

impl From<&NewUser> for NewUserRow {
    fn from(user: &NewUser) -> Self {
        Self {
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

impl From<&User> for UserChangeset {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedUserData {
            id: UserId::new(row.id),
            name: UserName::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            role: UserRole::new(row.role),
            created_at: row.created_at,
        }))
    }
}

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: i64,
    /// Project name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Start date.
    pub start_date: DateTime<Utc>,
    /// Optional end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Owning user.
    pub owner_id: i64,
}

/// Insert model for projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Start date.
    pub start_date: DateTime<Utc>,
    /// Optional end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Owning user.
    pub owner_id: i64,
}

/// Update model for the editable project columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    /// Project name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Start date.
    pub start_date: DateTime<Utc>,
    /// End date; `None` clears the column.
    pub end_date: Option<DateTime<Utc>>,
}

impl From<&NewProject> for NewProjectRow {
    fn from(project: &NewProject) -> Self {
        Self {
            name: project.name().as_str().to_owned(),
            description: project.description().to_owned(),
            status: project.status().as_str().to_owned(),
            start_date: project.start_date(),
            end_date: project.end_date(),
            owner_id: project.owner_id().value(),
        }
    }
}

impl From<&Project> for ProjectChangeset {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name().as_str().to_owned(),
            description: project.description().to_owned(),
            start_date: project.start_date(),
            end_date: project.end_date(),
        }
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = RowConversionError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedProjectData {
            id: ProjectId::new(row.id),
            name: ProjectName::new(row.name)?,
            description: row.description,
            status: ProjectStatus::try_from(row.status.as_str())?,
            start_date: row.start_date,
            end_date: row.end_date,
            owner_id: UserId::new(row.owner_id),
        }))
    }
}

/// Query result row for project memberships.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Membership identifier.
    pub id: i64,
    /// Project reference.
    pub project_id: i64,
    /// User reference.
    pub user_id: i64,
    /// Role label.
    pub role: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Insert model for project memberships.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_members)]
pub struct NewMemberRow {
    /// Project reference.
    pub project_id: i64,
    /// User reference.
    pub user_id: i64,
    /// Role label.
    pub role: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

impl From<&NewProjectMember> for NewMemberRow {
    fn from(member: &NewProjectMember) -> Self {
        Self {
            project_id: member.project_id().value(),
            user_id: member.user_id().value(),
            role: member.role().as_str().to_owned(),
            joined_at: member.joined_at(),
        }
    }
}

impl From<MemberRow> for ProjectMember {
    fn from(row: MemberRow) -> Self {
        Self::from_persisted(PersistedMemberData {
            id: MemberId::new(row.id),
            project_id: ProjectId::new(row.project_id),
            user_id: UserId::new(row.user_id),
            role: MemberRole::new(row.role),
            joined_at: row.joined_at,
        })
    }
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// First-completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional assignee.
    pub assignee_id: Option<i64>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning project.
    pub project_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee.
    pub assignee_id: Option<i64>,
}

/// Update model for the mutable task columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Lifecycle status.
    pub status: String,
    /// First-completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Assignee; `None` clears the column.
    pub assignee_id: Option<i64>,
}

impl From<&NewTask> for NewTaskRow {
    fn from(task: &NewTask) -> Self {
        Self {
            project_id: task.project_id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            created_at: task.created_at(),
            due_date: task.due_date(),
            assignee_id: task.assignee_id().map(UserId::value),
        }
    }
}

impl From<&TaskItem> for TaskChangeset {
    fn from(task: &TaskItem) -> Self {
        Self {
            status: task.status().as_str().to_owned(),
            completed_at: task.completed_at(),
            assignee_id: task.assignee_id().map(UserId::value),
        }
    }
}

impl TryFrom<TaskRow> for TaskItem {
    type Error = RowConversionError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            project_id: ProjectId::new(row.project_id),
            title: TaskTitle::new(row.title)?,
            description: row.description,
            status: TaskStatus::try_from(row.status.as_str())?,
            priority: TaskPriority::try_from(row.priority.as_str())?,
            created_at: row.created_at,
            due_date: row.due_date,
            completed_at: row.completed_at,
            assignee_id: row.assignee_id.map(UserId::new),
        }))
    }
}
