//! Error types for task domain validation and parsing.

use super::{SubtaskId, TaskId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// The assignee display name is empty after trimming.
    #[error("assignee name must not be empty")]
    EmptyAssigneeName,

    /// The vehicle display name is empty after trimming.
    #[error("vehicle name must not be empty")]
    EmptyVehicleName,

    /// The recurrence window closes before it opens.
    #[error("recurrence window starts at {starts_at} but ends at {ends_at}")]
    InvalidRecurrenceWindow {
        /// Requested window start.
        starts_at: DateTime<Utc>,
        /// Requested window end.
        ends_at: DateTime<Utc>,
    },

    /// The subtask does not belong to the task.
    #[error("subtask {subtask_id} not found on task {task_id}")]
    SubtaskNotFound {
        /// Task that was searched.
        task_id: TaskId,
        /// Subtask that was requested.
        subtask_id: SubtaskId,
    },
}

/// Error returned while parsing task statuses from persistence or UI input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing recurrence frequencies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence frequency: {0}")]
pub struct ParseRecurrenceFrequencyError(pub String);

/// Error returned while parsing user roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);

/// Normalizes enum input for lenient parsing.
///
/// Trims, lowercases, and drops `_`, `-` and spaces so `in_progress`,
/// `In Progress` and `inProgress` all compare equal.
pub(super) fn normalize_label(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
