//! Shared world state for project workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use projectdesk::{
    error::ErrorKind,
    project::{domain::Project, services::ProjectRegistryService},
    store::memory::InMemoryStore,
    task::{domain::TaskItem, services::TaskBoardService},
    user::{domain::User, services::UserDirectoryService},
};
use rstest::fixture;

/// Scenario world for project workflow behaviour tests.
pub struct ProjectWorkflowWorld {
    pub users: UserDirectoryService<InMemoryStore, DefaultClock>,
    pub projects: ProjectRegistryService<InMemoryStore, DefaultClock>,
    pub tasks: TaskBoardService<InMemoryStore, InMemoryStore, DefaultClock>,
    pub registered: HashMap<String, User>,
    pub project: Option<Project>,
    pub task: Option<TaskItem>,
    pub first_completed_at: Option<DateTime<Utc>>,
    pub last_error: Option<ErrorKind>,
}

impl ProjectWorkflowWorld {
    /// Creates a world whose services share one empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserDirectoryService::new(Arc::clone(&store), Arc::clone(&clock)),
            projects: ProjectRegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskBoardService::new(Arc::clone(&store), store, clock),
            registered: HashMap::new(),
            project: None,
            task: None,
            first_completed_at: None,
            last_error: None,
        }
    }

    /// Returns the user registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no user was registered under `name`.
    pub fn user(&self, name: &str) -> Result<&User, eyre::Report> {
        self.registered
            .get(name)
            .ok_or_else(|| eyre::eyre!("user {name} was not registered in this scenario"))
    }

    /// Returns the scenario's project.
    ///
    /// # Errors
    ///
    /// Returns an error if no project was created.
    pub fn current_project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task was created.
    pub fn current_task(&self) -> Result<&TaskItem, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for ProjectWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectWorkflowWorld {
    ProjectWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
