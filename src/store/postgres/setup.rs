//! Connection pool construction and schema bootstrap.

use super::store::PgPool;
use crate::config::{ConfigError, StoreSettings};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2026-10-01-000000_create_project_tables/up.sql");

/// Errors raised while preparing the `PostgreSQL` store.
#[derive(Debug, Error)]
pub enum StoreSetupError {
    /// The settings cannot configure a pool.
    #[error("invalid store settings: {0}")]
    Settings(#[source] ConfigError),
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] PoolError),
    /// The bundled schema could not be applied.
    #[error("failed to apply schema: {0}")]
    Schema(#[source] diesel::result::Error),
}

/// Builds an r2d2 connection pool from store settings.
///
/// # Errors
///
/// Returns [`StoreSetupError::Settings`] when the pool size or timeout is
/// zero, and [`StoreSetupError::Pool`] when no connection can be established
/// within the configured timeout.
pub fn build_pool(settings: &StoreSettings) -> Result<PgPool, StoreSetupError> {
    settings.validate().map_err(StoreSetupError::Settings)?;
    let manager = ConnectionManager::<PgConnection>::new(settings.database_url());
    let pool = Pool::builder()
        .max_size(settings.max_connections())
        .connection_timeout(settings.connection_timeout())
        .build(manager)
        .map_err(StoreSetupError::Pool)?;
    info!(
        max_connections = settings.max_connections(),
        "built PostgreSQL connection pool"
    );
    Ok(pool)
}

/// Creates the users, projects, memberships, and tasks tables when absent.
///
/// # Errors
///
/// Returns [`StoreSetupError::Schema`] when the schema statements fail.
pub fn apply_schema(connection: &mut PgConnection) -> Result<(), StoreSetupError> {
    connection
        .batch_execute(SCHEMA_SQL)
        .map_err(StoreSetupError::Schema)
}
