//! Domain model for fleet task lifecycle management.
//!
//! The task domain models status changes, rescheduling, checklist items,
//! assignment, and recurrence while keeping persistence and presentation
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod people;
mod recurrence;
mod status;
mod subtask;
mod task;

pub use error::{
    ParseRecurrenceFrequencyError, ParseTaskPriorityError, ParseTaskStatusError,
    ParseUserRoleError, TaskDomainError,
};
pub use ids::{SubtaskId, TaskId, UserId, VehicleId};
pub use people::{Assignee, User, UserRole, VehicleRef};
pub use recurrence::{RecurrenceFrequency, RecurrenceRule};
pub use status::{TaskPriority, TaskStatus};
pub use subtask::{Subtask, SubtaskProgress};
pub use task::{Task, TaskDetailsUpdate, TaskDraft};
