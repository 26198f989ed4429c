//! Relational store adapters.
//!
//! One store backs every aggregate, so foreign keys, cascades, and
//! uniqueness constraints can span users, projects, memberships, and tasks.
//! Each adapter implements all three repository ports:
//!
//! - [`memory::InMemoryStore`] for tests and embedding
//! - [`postgres::PostgresStore`] for `PostgreSQL` via Diesel

pub mod memory;
pub mod postgres;
