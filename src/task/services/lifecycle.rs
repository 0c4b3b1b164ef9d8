//! Service layer for task status changes, scheduling, checklists, and
//! recurrence.

use super::{CommitPolicy, TaskServiceConfig};
use crate::task::{
    domain::{
        Assignee, ParseTaskStatusError, RecurrenceRule, Subtask, SubtaskId, Task,
        TaskDetailsUpdate, TaskDomainError, TaskDraft, TaskId, TaskPriority, TaskStatus,
        VehicleRef,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task from the task editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    due_date: DateTime<Utc>,
    description: Option<String>,
    task_type: Option<String>,
    priority: TaskPriority,
    recurrence: Option<RecurrenceRule>,
    vehicle: Option<VehicleRef>,
    assignee: Option<Assignee>,
    subtask_titles: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            due_date,
            description: None,
            task_type: None,
            priority: TaskPriority::default(),
            recurrence: None,
            vehicle: None,
            assignee: None,
            subtask_titles: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the free-text task type.
    #[must_use]
    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = Some(task_type.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Makes the task recurring.
    #[must_use]
    pub const fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    /// Targets a vehicle.
    #[must_use]
    pub fn with_vehicle(mut self, vehicle: VehicleRef) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    /// Assigns the task on creation.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets initial checklist item titles.
    #[must_use]
    pub fn with_subtasks(mut self, titles: impl IntoIterator<Item = String>) -> Self {
        self.subtask_titles = titles.into_iter().collect();
        self
    }
}

/// Request payload for changing a task's status from UI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    task_id: TaskId,
    status: String,
}

impl ChangeStatusRequest {
    /// Creates a status change request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The requested status is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// No task has the given identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// No stored task owns the given subtask.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Loads a task or reports it missing.
pub(super) async fn load_task<R: TaskRepository>(
    repository: &R,
    task_id: TaskId,
) -> TaskLifecycleResult<Task> {
    repository
        .find_by_id(task_id)
        .await?
        .ok_or(TaskLifecycleError::TaskNotFound(task_id))
}

/// Task lifecycle orchestration service.
///
/// Every mutation is applied to the aggregate first and then committed
/// through the repository according to the configured [`CommitPolicy`].
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: TaskServiceConfig,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            config: TaskServiceConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub fn with_config(mut self, config: TaskServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskServiceConfig {
        &self.config
    }

    const fn commit_policy(&self) -> CommitPolicy {
        self.config.commit_policy
    }

    async fn commit_update(
        &self,
        operation: &'static str,
        task: &Task,
    ) -> TaskLifecycleResult<()> {
        let outcome = self.repository.update(task).await;
        self.commit_policy().settle(operation, task.id(), outcome)?;
        Ok(())
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title or a subtask
    /// title is empty, or [`TaskLifecycleError::Repository`] when a strict
    /// commit fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            due_date,
            description,
            task_type,
            priority,
            recurrence,
            vehicle,
            assignee,
            subtask_titles,
        } = request;

        let subtasks = subtask_titles
            .into_iter()
            .map(Subtask::new)
            .collect::<Result<Vec<_>, _>>()?;
        let mut draft = TaskDraft::new(title, due_date)?
            .with_priority(priority)
            .with_subtasks(subtasks);
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        if let Some(kind) = task_type {
            draft = draft.with_task_type(kind);
        }
        if let Some(rule) = recurrence {
            draft = draft.with_recurrence(rule);
        }
        if let Some(target) = vehicle {
            draft = draft.with_vehicle(target);
        }
        if let Some(user) = assignee {
            draft = draft.with_assignee(user);
        }

        let task = Task::new(draft, &*self.clock);
        let outcome = self.repository.store(&task).await;
        self.commit_policy().settle("create", task.id(), outcome)?;
        tracing::debug!(task_id = %task.id(), due_date = %task.due_date(), "created task");
        Ok(task)
    }

    /// Overwrites a task's status.
    ///
    /// Any parsed status is accepted regardless of the current one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] when the status string is
    /// not recognised, [`TaskLifecycleError::TaskNotFound`] when the task is
    /// missing, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn change_status(&self, request: ChangeStatusRequest) -> TaskLifecycleResult<Task> {
        let status = TaskStatus::try_from(request.status.as_str())?;
        let mut task = load_task(&*self.repository, request.task_id).await?;

        let previous = task.change_status(status, &*self.clock);
        if !previous.can_transition_to(status) {
            tracing::debug!(
                task_id = %task.id(),
                from = %previous,
                to = %status,
                "applying status change outside the nominal lifecycle"
            );
        }
        self.commit_update("change_status", &task).await?;
        tracing::debug!(
            task_id = %task.id(),
            from = %previous,
            to = %status,
            "changed task status"
        );
        Ok(task)
    }

    /// Moves a task's due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is missing,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn reschedule(
        &self,
        task_id: TaskId,
        due_date: DateTime<Utc>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = load_task(&*self.repository, task_id).await?;
        task.reschedule(due_date, &*self.clock);
        self.commit_update("reschedule", &task).await?;
        tracing::debug!(%task_id, %due_date, "rescheduled task");
        Ok(task)
    }

    /// Generates and stores the successor of a completed recurring task.
    ///
    /// Returns `Ok(None)` when the task is not recurring, not completed,
    /// past its recurrence window, or already has a stored successor. A
    /// repeated call for the same task therefore stores at most one
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is missing,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_next_recurring_task(
        &self,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Option<Task>> {
        let task = load_task(&*self.repository, task_id).await?;
        let Some(successor) = task.next_occurrence(&*self.clock) else {
            tracing::debug!(
                %task_id,
                status = %task.status(),
                "no recurring successor produced"
            );
            return Ok(None);
        };

        let existing = self
            .repository
            .list(&TaskFilter::new().with_recurrence_parent(task_id))
            .await?;
        if let Some(previous) = existing.first() {
            tracing::debug!(
                %task_id,
                successor_id = %previous.id(),
                "recurring successor already stored"
            );
            return Ok(None);
        }

        let outcome = self.repository.store(&successor).await;
        self.commit_policy()
            .settle("create_next_recurring_task", successor.id(), outcome)?;
        tracing::info!(
            %task_id,
            successor_id = %successor.id(),
            due_date = %successor.due_date(),
            "generated recurring task"
        );
        Ok(Some(successor))
    }

    /// Deletes a task and every subtask it owns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is missing,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = load_task(&*self.repository, task_id).await?;
        let outcome = self.repository.delete(task_id).await;
        self.commit_policy().settle("delete", task_id, outcome)?;
        tracing::debug!(%task_id, subtasks = task.subtasks().len(), "deleted task");
        Ok(())
    }

    /// Appends a checklist item to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is empty,
    /// [`TaskLifecycleError::TaskNotFound`] when the task is missing, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn add_subtask(
        &self,
        task_id: TaskId,
        title: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let mut task = load_task(&*self.repository, task_id).await?;
        let subtask_id = task.add_subtask(title, &*self.clock)?;
        self.commit_update("add_subtask", &task).await?;
        tracing::debug!(%task_id, %subtask_id, "added subtask");
        Ok(task)
    }

    /// Removes a checklist item from its task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::SubtaskNotFound`] when no task owns the
    /// item, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn remove_subtask(&self, subtask_id: SubtaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_subtask_owner(subtask_id).await?;
        task.remove_subtask(subtask_id, &*self.clock)?;
        self.commit_update("remove_subtask", &task).await?;
        tracing::debug!(task_id = %task.id(), %subtask_id, "removed subtask");
        Ok(task)
    }

    /// Flips a checklist item's completion flag.
    ///
    /// The owning task's status is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::SubtaskNotFound`] when no task owns the
    /// item, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn toggle_subtask(&self, subtask_id: SubtaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_subtask_owner(subtask_id).await?;
        let is_completed = task.toggle_subtask(subtask_id, &*self.clock)?;
        self.commit_update("toggle_subtask", &task).await?;
        tracing::debug!(task_id = %task.id(), %subtask_id, is_completed, "toggled subtask");
        Ok(task)
    }

    /// Applies the task-detail form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the replacement title is
    /// empty, [`TaskLifecycleError::TaskNotFound`] when the task is missing,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn edit_details(
        &self,
        task_id: TaskId,
        update: TaskDetailsUpdate,
    ) -> TaskLifecycleResult<Task> {
        let mut task = load_task(&*self.repository, task_id).await?;
        task.edit_details(update, &*self.clock)?;
        self.commit_update("edit_details", &task).await?;
        tracing::debug!(%task_id, "edited task details");
        Ok(task)
    }

    /// Replaces or removes a task's recurrence rule.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is missing,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn set_recurrence(
        &self,
        task_id: TaskId,
        rule: Option<RecurrenceRule>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = load_task(&*self.repository, task_id).await?;
        task.set_recurrence(rule, &*self.clock);
        self.commit_update("set_recurrence", &task).await?;
        tracing::debug!(%task_id, frequency = ?task.recurrence_frequency(), "updated recurrence");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists tasks matching the filter, ordered by due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Lists open tasks whose due date has passed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn overdue_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let now = self.clock.utc();
        let tasks = self.repository.list(&TaskFilter::new()).await?;
        Ok(tasks.into_iter().filter(|task| task.is_overdue(now)).collect())
    }

    async fn load_subtask_owner(&self, subtask_id: SubtaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_subtask_id(subtask_id)
            .await?
            .ok_or(TaskLifecycleError::SubtaskNotFound(subtask_id))
    }
}
