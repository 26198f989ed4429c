//! [`ProjectRepository`] implementation for the in-memory store.

use super::InMemoryStore;
use crate::project::{
    domain::{
        NewProject, NewProjectMember, Project, ProjectDetails, ProjectId, ProjectInclude,
        ProjectMember,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if !state.users.contains_key(&project.owner_id()) {
            return Err(ProjectRepositoryError::OwnerNotFound(project.owner_id()));
        }

        let id = state.next_project_id();
        let stored = project.clone().with_id(id);
        state.projects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        let existing = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        existing.replace_details(
            project.name().clone(),
            project.description().to_owned(),
            project.start_date(),
            project.end_date(),
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ProjectId,
        include: ProjectInclude,
    ) -> ProjectRepositoryResult<Option<ProjectDetails>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state
            .projects
            .get(&id)
            .map(|project| state.project_details(project, include)))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        include: ProjectInclude,
    ) -> ProjectRepositoryResult<Vec<ProjectDetails>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        let visible = state
            .projects
            .values()
            .filter(|project| {
                project.owner_id() == user_id || state.find_member(project.id(), user_id).is_some()
            })
            .map(|project| state.project_details(project, include))
            .collect();
        Ok(visible)
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.remove_project(id))
    }

    async fn add_member(
        &self,
        member: &NewProjectMember,
    ) -> ProjectRepositoryResult<ProjectMember> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if !state.projects.contains_key(&member.project_id()) {
            return Err(ProjectRepositoryError::NotFound(member.project_id()));
        }
        if !state.users.contains_key(&member.user_id()) {
            return Err(ProjectRepositoryError::UserNotFound(member.user_id()));
        }
        if state
            .find_member(member.project_id(), member.user_id())
            .is_some()
        {
            return Err(ProjectRepositoryError::DuplicateMember {
                project_id: member.project_id(),
                user_id: member.user_id(),
            });
        }

        let id = state.next_member_id();
        let stored = member.clone().with_id(id);
        state.members.insert(id, stored.clone());
        Ok(stored)
    }

    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        let Some(member_id) = state.find_member(project_id, user_id) else {
            return Ok(false);
        };
        state.members.remove(&member_id);
        Ok(true)
    }
}
