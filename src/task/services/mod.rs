//! Application services for the task board.

mod board;

pub use board::{CreateTaskRequest, TaskBoardError, TaskBoardResult, TaskBoardService};
