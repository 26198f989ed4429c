//! Shared helpers for `PostgreSQL` store integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use eyre::WrapErr;
use mockable::DefaultClock;
use projectdesk::{
    config::StoreSettings,
    project::{
        domain::Project,
        services::{ProjectRegistryService, ProjectRequest},
    },
    store::postgres::{PostgresStore, apply_schema, build_pool},
    task::{
        domain::TaskItem,
        services::{CreateTaskRequest, TaskBoardService},
    },
    user::{
        domain::User,
        services::{CreateUserRequest, UserDirectoryService},
    },
};

/// Variable naming the database used by these tests.
pub const TEST_DATABASE_URL_VAR: &str = "PROJECTDESK_TEST_DATABASE_URL";

static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// The three services wired to one `PostgreSQL` store.
pub struct PgDesk {
    pub users: UserDirectoryService<PostgresStore, DefaultClock>,
    pub projects: ProjectRegistryService<PostgresStore, DefaultClock>,
    pub tasks: TaskBoardService<PostgresStore, PostgresStore, DefaultClock>,
}

impl PgDesk {
    /// Connects to the test database and applies the schema, or returns
    /// `None` when no test database is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built or the schema fails.
    pub fn connect() -> Result<Option<Self>, eyre::Report> {
        let Some(url) = std::env::var(TEST_DATABASE_URL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
        else {
            return Ok(None);
        };
        let settings = StoreSettings::new(url)
            .with_max_connections(4)
            .wrap_err("configure test pool")?;
        let pool = build_pool(&settings).wrap_err("build test pool")?;
        let mut connection = pool.get().wrap_err("check out schema connection")?;
        apply_schema(&mut connection).wrap_err("apply schema")?;

        let store = Arc::new(PostgresStore::new(pool));
        let clock = Arc::new(DefaultClock);
        Ok(Some(Self {
            users: UserDirectoryService::new(Arc::clone(&store), Arc::clone(&clock)),
            projects: ProjectRegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskBoardService::new(Arc::clone(&store), store, clock),
        }))
    }

    /// Registers a user with an email unique to this test run.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn user(&self, name: &str) -> Result<User, eyre::Report> {
        Ok(self
            .users
            .create(CreateUserRequest::new(name, unique_email(name)))
            .await?)
    }

    /// Creates a project owned by `owner`.
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

    /// Creates a task in `project`.
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

/// Builds an email address no other test run has used.
#[must_use]
pub fn unique_email(name: &str) -> String {
    let suffix = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}.{}.{suffix}@example.com",
        name.to_lowercase(),
        Utc::now().timestamp_micros()
    )
}
