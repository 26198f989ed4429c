//! Domain model for the user directory.
//!
//! Users carry a validated display name, a unique email address, and a
//! free-text role label. All infrastructure concerns stay outside the domain
//! boundary.

mod email;
mod error;
mod ids;
mod name;
mod role;
mod user;

pub use email::EmailAddress;
pub use error::UserDomainError;
pub use ids::UserId;
pub use name::UserName;
pub use role::UserRole;
pub use user::{NewUser, PersistedUserData, User};
