//! Project registry for projectdesk.
//!
//! Manages projects and their memberships: creating a project for an owning
//! user, reading it with an explicit set of related rows, listing the
//! projects a user owns or belongs to, and adding or removing members. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
