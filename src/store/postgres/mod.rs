//! `PostgreSQL` store built on Diesel.
//!
//! [`PostgresStore`] runs each repository call on a pooled connection inside
//! `tokio::task::spawn_blocking`. Referential rules live in the schema and
//! violated constraints are reported through the port error types.

mod models;
mod projects;
mod relations;
mod schema;
mod setup;
mod store;
mod tasks;
mod users;

pub use models::RowConversionError;
pub use setup::{StoreSetupError, apply_schema, build_pool};
pub use store::{PgPool, PostgresStore, StoreAccessError};
