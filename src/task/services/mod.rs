//! Application services for task lifecycle orchestration.

mod assignment;
mod config;
mod lifecycle;

pub use assignment::{TaskAssignmentService, eligible_assignees};
pub use config::{CommitPolicy, TaskServiceConfig};
pub use lifecycle::{
    ChangeStatusRequest, CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
