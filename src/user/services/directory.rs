//! Service layer for user registration, lookup, update, and removal.

use crate::error::ErrorKind;
use crate::user::{
    domain::{EmailAddress, NewUser, User, UserDomainError, UserId, UserName, UserRole},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    role: Option<String>,
}

impl CreateUserRequest {
    /// Creates a request with the required user fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
        }
    }

    /// Sets the role label. Without one the user gets the default role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Request payload replacing every editable user field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    name: String,
    email: String,
    role: String,
}

impl UpdateUserRequest {
    /// Creates a full-replacement request.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl UserDirectoryError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => match err {
                UserRepositoryError::NotFound(_) => ErrorKind::NotFound,
                UserRepositoryError::DuplicateEmail(_) | UserRepositoryError::OwnsProjects(_) => {
                    ErrorKind::Conflict
                }
                UserRepositoryError::InvalidPersistedData(_)
                | UserRepositoryError::Persistence(_) => ErrorKind::Store,
            },
        }
    }
}

/// Result type for user directory service operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] when the name or email fails
    /// validation, or [`UserDirectoryError::Repository`] with
    /// [`UserRepositoryError::DuplicateEmail`] when the address is taken.
    pub async fn create(&self, request: CreateUserRequest) -> UserDirectoryResult<User> {
        let CreateUserRequest { name, email, role } = request;
        let new_user = NewUser::new(
            UserName::new(name)?,
            EmailAddress::new(email)?,
            UserRole::from_optional(role),
            &*self.clock,
        );

        let user = self.repository.insert(&new_user).await?;
        info!(user_id = %user.id(), email = %user.email(), "user created");
        Ok(user)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) when no user has
    /// the identifier.
    pub async fn get_by_id(&self, id: UserId) -> UserDirectoryResult<User> {
        self.find_by_id_or_error(id).await
    }

    /// Returns every registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> UserDirectoryResult<Vec<User>> {
        Ok(self.repository.list_all().await?)
    }

    /// Replaces a user's name, email, and role.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] when validation fails, or
    /// [`UserDirectoryError::Repository`] when the user does not exist or the
    /// new email belongs to another user.
    pub async fn update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> UserDirectoryResult<User> {
        let UpdateUserRequest { name, email, role } = request;
        let validated_name = UserName::new(name)?;
        let validated_email = EmailAddress::new(email)?;

        let mut user = self.find_by_id_or_error(id).await?;
        user.replace_details(validated_name, validated_email, UserRole::new(role));
        self.repository.update(&user).await?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Removes a user. Removing an unknown user succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::OwnsProjects`] (wrapped) while the user
    /// owns any project, or a persistence error.
    pub async fn delete(&self, id: UserId) -> UserDirectoryResult<()> {
        if self.repository.delete(id).await? {
            info!(user_id = %id, "user deleted");
        } else {
            debug!(user_id = %id, "user already absent; delete is a no-op");
        }
        Ok(())
    }

    async fn find_by_id_or_error(&self, id: UserId) -> UserDirectoryResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserRepositoryError::NotFound(id).into())
    }
}
