//! Domain model for project tasks.
//!
//! The task domain models task creation, the status lifecycle with its
//! completion timestamp rule, and assignment, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod details;
mod error;
mod ids;
mod priority;
mod status;
mod task;
mod title;

pub use details::{TaskDetails, TaskInclude};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, TaskItem};
pub use title::TaskTitle;
