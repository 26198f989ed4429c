//! Service layer for project creation, lookup, update, removal, and
//! membership.

use crate::error::ErrorKind;
use crate::project::{
    domain::{
        MemberRole, NewProject, NewProjectMember, Project, ProjectDetails, ProjectDomainError,
        ProjectId, ProjectInclude, ProjectMember, ProjectName,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload carrying the editable project fields.
///
/// Used both to create a project and to replace an existing project's
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    description: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
}

impl ProjectRequest {
    /// Creates a request with the required fields and an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            start_date,
            end_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Service-level errors for project registry operations.
#[derive(Debug, Error)]
pub enum ProjectRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

impl ProjectRegistryError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => match err {
                ProjectRepositoryError::NotFound(_)
                | ProjectRepositoryError::OwnerNotFound(_)
                | ProjectRepositoryError::UserNotFound(_) => ErrorKind::NotFound,
                ProjectRepositoryError::DuplicateMember { .. } => ErrorKind::Conflict,
                ProjectRepositoryError::InvalidPersistedData(_)
                | ProjectRepositoryError::Persistence(_) => ErrorKind::Store,
            },
        }
    }
}

/// Result type for project registry service operations.
pub type ProjectRegistryResult<T> = Result<T, ProjectRegistryError>;

/// Project registry orchestration service.
#[derive(Clone)]
pub struct ProjectRegistryService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectRegistryService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by `owner_id`, starting in planning.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Domain`] when the name fails
    /// validation, or [`ProjectRepositoryError::OwnerNotFound`] (wrapped)
    /// when the owner does not exist.
    pub async fn create(
        &self,
        request: ProjectRequest,
        owner_id: UserId,
    ) -> ProjectRegistryResult<Project> {
        let ProjectRequest {
            name,
            description,
            start_date,
            end_date,
        } = request;
        let new_project = NewProject::new(
            ProjectName::new(name)?,
            description,
            start_date,
            end_date,
            owner_id,
        );

        let project = self.repository.insert(&new_project).await?;
        info!(project_id = %project.id(), owner_id = %owner_id, "project created");
        Ok(project)
    }

    /// Retrieves a project with the requested relations.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when no project
    /// has the identifier.
    pub async fn get_by_id(
        &self,
        id: ProjectId,
        include: ProjectInclude,
    ) -> ProjectRegistryResult<ProjectDetails> {
        self.repository
            .find_by_id(id, include)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(id).into())
    }

    /// Lists the projects a user owns or is a member of.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        include: ProjectInclude,
    ) -> ProjectRegistryResult<Vec<ProjectDetails>> {
        let projects = self.repository.list_for_user(user_id, include).await?;
        debug!(user_id = %user_id, count = projects.len(), "listed projects for user");
        Ok(projects)
    }

    /// Replaces a project's name, description, and schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Domain`] when the name fails
    /// validation, or [`ProjectRepositoryError::NotFound`] (wrapped) when the
    /// project does not exist.
    pub async fn update(
        &self,
        id: ProjectId,
        request: ProjectRequest,
    ) -> ProjectRegistryResult<Project> {
        let ProjectRequest {
            name,
            description,
            start_date,
            end_date,
        } = request;
        let validated_name = ProjectName::new(name)?;

        let mut project = self.get_by_id(id, ProjectInclude::none()).await?.project;
        project.replace_details(validated_name, description, start_date, end_date);
        self.repository.update(&project).await?;
        info!(project_id = %id, "project updated");
        Ok(project)
    }

    /// Removes a project with its tasks and memberships. Removing an unknown
    /// project succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when persistence fails.
    pub async fn delete(&self, id: ProjectId) -> ProjectRegistryResult<()> {
        if self.repository.delete(id).await? {
            info!(project_id = %id, "project deleted");
        } else {
            debug!(project_id = %id, "project already absent; delete is a no-op");
        }
        Ok(())
    }

    /// Adds a user as a project member. A missing or blank role defaults to
    /// `"Member"`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateMember`] (wrapped) when the
    /// user is already a member, or a not-found error for an unknown project
    /// or user.
    pub async fn add_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: Option<String>,
    ) -> ProjectRegistryResult<ProjectMember> {
        let member_role = role.map_or_else(MemberRole::default, MemberRole::new);
        let new_member = NewProjectMember::new(project_id, user_id, member_role, &*self.clock);

        let member = self.repository.add_member(&new_member).await?;
        info!(
            project_id = %project_id,
            user_id = %user_id,
            role = %member.role(),
            "project member added"
        );
        Ok(member)
    }

    /// Removes a membership. Removing a missing pairing succeeds without
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRegistryError::Repository`] when persistence fails.
    pub async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRegistryResult<()> {
        if self.repository.remove_member(project_id, user_id).await? {
            info!(project_id = %project_id, user_id = %user_id, "project member removed");
        } else {
            debug!(
                project_id = %project_id,
                user_id = %user_id,
                "membership already absent; remove is a no-op"
            );
        }
        Ok(())
    }
}
