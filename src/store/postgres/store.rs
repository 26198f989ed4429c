//! Shared `PostgreSQL` store handle and error plumbing.

use super::models::RowConversionError;
use crate::project::ports::ProjectRepositoryError;
use crate::task::ports::TaskRepositoryError;
use crate::user::ports::UserRepositoryError;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;
use thiserror::Error;
use tokio::task::JoinError;

/// `PostgreSQL` connection pool type used by the store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub(super) const USERS_EMAIL_KEY: &str = "users_email_key";
pub(super) const PROJECTS_OWNER_FKEY: &str = "projects_owner_id_fkey";
pub(super) const MEMBERS_PAIR_KEY: &str = "project_members_project_user_key";
pub(super) const MEMBERS_PROJECT_FKEY: &str = "project_members_project_id_fkey";
pub(super) const MEMBERS_USER_FKEY: &str = "project_members_user_id_fkey";
pub(super) const TASKS_PROJECT_FKEY: &str = "tasks_project_id_fkey";
pub(super) const TASKS_ASSIGNEE_FKEY: &str = "tasks_assignee_id_fkey";

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(super) async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreAccessError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreAccessError::Pool)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreAccessError::Join)?
    }
}

/// Failure to reach a connection before running a query.
#[derive(Debug, Error)]
pub enum StoreAccessError {
    /// No pooled connection became available.
    #[error("connection pool error: {0}")]
    Pool(#[source] PoolError),
    /// The blocking query task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[source] JoinError),
}

/// Failure while reading rows and rebuilding domain values.
#[derive(Debug, Error)]
pub(super) enum ReadError {
    #[error(transparent)]
    Query(#[from] DieselError),
    #[error(transparent)]
    Row(#[from] RowConversionError),
}

macro_rules! impl_store_errors {
    ($($error:ty),+ $(,)?) => {$(
        impl From<StoreAccessError> for $error {
            fn from(err: StoreAccessError) -> Self {
                Self::persistence(err)
            }
        }

        impl From<ReadError> for $error {
            fn from(err: ReadError) -> Self {
                match err {
                    ReadError::Query(query) => Self::persistence(query),
                    ReadError::Row(row) => Self::invalid_persisted_data(row),
                }
            }
        }
    )+};
}

impl_store_errors!(UserRepositoryError, ProjectRepositoryError, TaskRepositoryError);

/// Returns the name of the constraint a database error violated, if any.
pub(super) fn violated_constraint(err: &DieselError) -> Option<&str> {
    match err {
        DieselError::DatabaseError(_, info) => info.constraint_name(),
        _ => None,
    }
}
