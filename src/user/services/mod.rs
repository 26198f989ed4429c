//! Application services for the user directory.

mod directory;

pub use directory::{
    CreateUserRequest, UpdateUserRequest, UserDirectoryError, UserDirectoryResult,
    UserDirectoryService,
};
