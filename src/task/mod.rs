//! Task board for projectdesk.
//!
//! Tracks work items scoped to a project: creating tasks, reading them with
//! an explicit set of related rows, moving them between statuses, assigning
//! them to users, and removing them. Completing a task stamps its completion
//! time once; later status changes never clear it. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;
