//! Domain model for projects and project membership.
//!
//! A project is owned by exactly one user and grants access to further users
//! through membership rows. Tasks and members are dependent rows that live and
//! die with their project.

mod details;
mod error;
mod ids;
mod member;
mod name;
mod project;
mod status;

pub use details::{MemberDetails, ProjectDetails, ProjectInclude};
pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::{MemberId, ProjectId};
pub use member::{MemberRole, NewProjectMember, PersistedMemberData, ProjectMember};
pub use name::ProjectName;
pub use project::{NewProject, PersistedProjectData, Project};
pub use status::ProjectStatus;
