//! Shared test helpers for in-memory store integration tests.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use projectdesk::{
    project::{
        domain::Project,
        services::{ProjectRegistryService, ProjectRequest},
    },
    store::memory::InMemoryStore,
    task::{
        domain::TaskItem,
        services::{CreateTaskRequest, TaskBoardService},
    },
    user::{
        domain::User,
        services::{CreateUserRequest, UserDirectoryService},
    },
};
use rstest::fixture;

/// The three services wired to one shared in-memory store.
pub struct Desk {
    pub users: UserDirectoryService<InMemoryStore, DefaultClock>,
    pub projects: ProjectRegistryService<InMemoryStore, DefaultClock>,
    pub tasks: TaskBoardService<InMemoryStore, InMemoryStore, DefaultClock>,
}

impl Desk {
    /// Wires every service to `store`.
    #[must_use]
    pub fn new(store: InMemoryStore) -> Self {
        let shared = Arc::new(store);
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserDirectoryService::new(Arc::clone(&shared), Arc::clone(&clock)),
            projects: ProjectRegistryService::new(Arc::clone(&shared), Arc::clone(&clock)),
            tasks: TaskBoardService::new(Arc::clone(&shared), shared, clock),
        }
    }

    /// Registers a user whose email derives from `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn user(&self, name: &str) -> Result<User, eyre::Report> {
        let email = format!("{}@example.com", name.to_lowercase());
        Ok(self
            .users
            .create(CreateUserRequest::new(name, email))
            .await?)
    }

    /// Creates a project named `name` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if project creation fails.
    pub async fn project(&self, owner: &User, name: &str) -> Result<Project, eyre::Report> {
        Ok(self
            .projects
            .create(ProjectRequest::new(name, Utc::now()), owner.id())
            .await?)
    }

    /// Creates a task titled `title` in `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if task creation fails.
    pub async fn task(&self, project: &Project, title: &str) -> Result<TaskItem, eyre::Report> {
        Ok(self
            .tasks
            .create(project.id(), CreateTaskRequest::new(title))
            .await?)
    }
}

/// Provides services over a fresh store for each test.
#[fixture]
pub fn desk() -> Desk {
    Desk::new(InMemoryStore::new())
}
