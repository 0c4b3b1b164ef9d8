//! Repository port for task persistence and lookup.

use crate::task::domain::{SubtaskId, Task, TaskId, TaskStatus, UserId, VehicleId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Subtasks are stored as part of their owning task, so every write
/// persists the whole checklist and [`TaskRepository::delete`] removes it.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, schedule, assignment,
    /// checklist, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task together with its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds the task owning the given subtask.
    ///
    /// Returns `None` when no stored task owns the subtask.
    async fn find_by_subtask_id(&self, id: SubtaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task matching the filter, ordered by due date.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;
}

/// Conjunctive task query used by list screens and successor lookups.
///
/// An empty filter matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    assignee: Option<UserId>,
    vehicle: Option<VehicleId>,
    recurrence_parent: Option<TaskId>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to tasks assigned to one user.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assignee = Some(user_id);
        self
    }

    /// Restricts results to tasks targeting one vehicle.
    #[must_use]
    pub const fn with_vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle = Some(vehicle_id);
        self
    }

    /// Restricts results to occurrences generated from one recurring task.
    #[must_use]
    pub const fn with_recurrence_parent(mut self, parent_id: TaskId) -> Self {
        self.recurrence_parent = Some(parent_id);
        self
    }

    /// Returns whether the task satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = self.status.is_none_or(|status| task.status() == status);
        let assignee_matches = self
            .assignee
            .is_none_or(|id| task.assignee().is_some_and(|a| a.id() == id));
        let vehicle_matches = self
            .vehicle
            .is_none_or(|id| task.vehicle().is_some_and(|v| v.id() == id));
        let parent_matches = self
            .recurrence_parent
            .is_none_or(|id| task.recurrence_parent() == Some(id));

        status_matches && assignee_matches && vehicle_matches && parent_matches
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
