//! Application services for the project registry.

mod registry;

pub use registry::{
    ProjectRegistryError, ProjectRegistryResult, ProjectRegistryService, ProjectRequest,
};
