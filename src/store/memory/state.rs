//! Table storage and relational rules shared by the in-memory adapters.

use crate::project::domain::{
    MemberDetails, MemberId, Project, ProjectDetails, ProjectId, ProjectInclude, ProjectMember,
};
use crate::task::domain::{TaskDetails, TaskId, TaskInclude, TaskItem};
use crate::user::domain::{EmailAddress, User, UserId};
use std::collections::BTreeMap;

/// Tables keyed by identifier so iteration follows insertion order.
#[derive(Debug, Default)]
pub(super) struct StoreState {
    pub(super) users: BTreeMap<UserId, User>,
    pub(super) projects: BTreeMap<ProjectId, Project>,
    pub(super) members: BTreeMap<MemberId, ProjectMember>,
    pub(super) tasks: BTreeMap<TaskId, TaskItem>,
    sequences: Sequences,
}

/// Last identifier issued per table.
#[derive(Debug, Default)]
struct Sequences {
    users: i64,
    projects: i64,
    members: i64,
    tasks: i64,
}

fn advance(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl StoreState {
    pub(super) fn next_user_id(&mut self) -> UserId {
        UserId::new(advance(&mut self.sequences.users))
    }

    pub(super) fn next_project_id(&mut self) -> ProjectId {
        ProjectId::new(advance(&mut self.sequences.projects))
    }

    pub(super) fn next_member_id(&mut self) -> MemberId {
        MemberId::new(advance(&mut self.sequences.members))
    }

    pub(super) fn next_task_id(&mut self) -> TaskId {
        TaskId::new(advance(&mut self.sequences.tasks))
    }

    /// Returns whether a user other than `except` holds `email`.
    pub(super) fn email_taken(&self, email: &EmailAddress, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email().same_address(email) && Some(user.id()) != except)
    }

    pub(super) fn owns_projects(&self, user_id: UserId) -> bool {
        self.projects
            .values()
            .any(|project| project.owner_id() == user_id)
    }

    pub(super) fn find_member(&self, project_id: ProjectId, user_id: UserId) -> Option<MemberId> {
        self.members
            .values()
            .find(|member| member.project_id() == project_id && member.user_id() == user_id)
            .map(ProjectMember::id)
    }

    /// Removes a user, cascading memberships and nulling assignments. The
    /// caller checks project ownership first.
    pub(super) fn remove_user(&mut self, user_id: UserId) -> bool {
        if self.users.remove(&user_id).is_none() {
            return false;
        }
        self.members.retain(|_, member| member.user_id() != user_id);
        for task in self.tasks.values_mut() {
            if task.assignee_id() == Some(user_id) {
                task.assign(None);
            }
        }
        true
    }

    /// Removes a project, cascading its tasks and memberships.
    pub(super) fn remove_project(&mut self, project_id: ProjectId) -> bool {
        if self.projects.remove(&project_id).is_none() {
            return false;
        }
        self.tasks.retain(|_, task| task.project_id() != project_id);
        self.members
            .retain(|_, member| member.project_id() != project_id);
        true
    }

    pub(super) fn project_details(
        &self,
        project: &Project,
        include: ProjectInclude,
    ) -> ProjectDetails {
        let mut details = ProjectDetails::bare(project.clone());
        if include.owner() {
            details.owner = self.users.get(&project.owner_id()).cloned();
        }
        if include.tasks() {
            details.tasks = Some(
                self.tasks
                    .values()
                    .filter(|task| task.project_id() == project.id())
                    .cloned()
                    .collect(),
            );
        }
        if include.members() {
            details.members = Some(
                self.members
                    .values()
                    .filter(|member| member.project_id() == project.id())
                    .filter_map(|member| {
                        self.users.get(&member.user_id()).map(|user| MemberDetails {
                            member: member.clone(),
                            user: user.clone(),
                        })
                    })
                    .collect(),
            );
        }
        details
    }

    pub(super) fn task_details(&self, task: &TaskItem, include: TaskInclude) -> TaskDetails {
        let mut details = TaskDetails::bare(task.clone());
        if include.project() {
            details.project = self.projects.get(&task.project_id()).cloned();
        }
        if include.assignee() {
            details.assignee = task
                .assignee_id()
                .and_then(|user_id| self.users.get(&user_id))
                .cloned();
        }
        details
    }
}
