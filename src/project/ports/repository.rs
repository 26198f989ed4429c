//! Repository port for project and membership persistence.

use crate::project::domain::{
    NewProject, NewProjectMember, Project, ProjectDetails, ProjectId, ProjectInclude,
    ProjectMember,
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::OwnerNotFound`] when the owner does
    /// not reference an existing user.
    async fn insert(&self, project: &NewProject) -> ProjectRepositoryResult<Project>;

    /// Persists name, description, and schedule changes to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier, loading the requested relations.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(
        &self,
        id: ProjectId,
        include: ProjectInclude,
    ) -> ProjectRepositoryResult<Option<ProjectDetails>>;

    /// Returns every project the user owns or is a member of, each once, in
    /// ascending identifier order.
    async fn list_for_user(
        &self,
        user_id: UserId,
        include: ProjectInclude,
    ) -> ProjectRepositoryResult<Vec<ProjectDetails>>;

    /// Removes a project together with its tasks and memberships.
    ///
    /// Returns `false` when no project had the identifier.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool>;

    /// Stores a membership row.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateMember`] when the pairing
    /// exists, [`ProjectRepositoryError::NotFound`] for an unknown project, or
    /// [`ProjectRepositoryError::UserNotFound`] for an unknown user.
    async fn add_member(
        &self,
        member: &NewProjectMember,
    ) -> ProjectRepositoryResult<ProjectMember>;

    /// Removes the membership pairing.
    ///
    /// Returns `false` when the pairing did not exist.
    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The owning user does not exist.
    #[error("project owner not found: {0}")]
    OwnerNotFound(UserId),

    /// The user to add as a member does not exist.
    #[error("member user not found: {0}")]
    UserNotFound(UserId),

    /// The user is already a member of the project.
    #[error("user {user_id} is already a member of project {project_id}")]
    DuplicateMember {
        /// Project of the existing membership.
        project_id: ProjectId,
        /// User of the existing membership.
        user_id: UserId,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
