//! Step definitions for project workflow scenarios.

pub mod given;
pub mod world;
