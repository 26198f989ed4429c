//! Projectdesk: project-management backend core.
//!
//! This crate tracks users, projects, project memberships, and tasks, and
//! exposes the create, read, update, and delete operations together with the
//! task lifecycle, task assignment, and membership transitions.
//!
//! # Architecture
//!
//! Projectdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete store implementations of the ports
//!
//! # Modules
//!
//! - [`user`]: User directory
//! - [`project`]: Project registry and membership
//! - [`task`]: Task board and status lifecycle
//! - [`store`]: In-memory and `PostgreSQL` stores implementing every port
//! - [`config`]: Store connection settings
//! - [`error`]: Error kinds shared by all services

pub mod config;
pub mod error;
pub mod project;
pub mod store;
pub mod task;
pub mod user;
