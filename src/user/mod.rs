//! User directory for projectdesk.
//!
//! Manages user records: registration with validated name and email,
//! lookup, full replacement updates, and removal. Users are the leaf of the
//! model; projects and tasks refer to them by [`domain::UserId`] only. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Store adapters live in [`crate::store`] because one relational store
//! backs every aggregate.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
