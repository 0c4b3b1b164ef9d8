//! Task aggregate root and its lifecycle operations.

use super::{
    Assignee, RecurrenceFrequency, RecurrenceRule, Subtask, SubtaskId, SubtaskProgress,
    TaskDomainError, TaskId, TaskPriority, TaskStatus, VehicleRef,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Validated input for creating a task.
///
/// # Examples
///
///     use chrono::{TimeZone, Utc};
///     use fleet_tasks::task::domain::{TaskDraft, TaskPriority};
///
///     let due = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
///     let draft = TaskDraft::new("Replace brake pads", due)
///         .expect("valid")
///         .with_priority(TaskPriority::High);
///     assert_eq!(draft.title(), "Replace brake pads");
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    task_type: String,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
    recurrence: Option<RecurrenceRule>,
    vehicle: Option<VehicleRef>,
    assignee: Option<Assignee>,
    subtasks: Vec<Subtask>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Result<Self, TaskDomainError> {
        let raw_title: String = title.into();
        Ok(Self {
            title: validate_title(&raw_title)?,
            description: String::new(),
            task_type: String::new(),
            priority: TaskPriority::default(),
            due_date,
            recurrence: None,
            vehicle: None,
            assignee: None,
            subtasks: Vec::new(),
        })
    }

    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the free-text task type.
    #[must_use]
    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
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

    /// Adds initial checklist items.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = Subtask>) -> Self {
        self.subtasks.extend(subtasks);
        self
    }
}

/// Editable fields of the task-detail form.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement free-text type.
    pub task_type: Option<String>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
}

/// Task aggregate root.
///
/// Tasks are only constructed through [`Task::new`] and
/// [`Task::next_occurrence`]; serialization is one-way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    task_type: String,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: DateTime<Utc>,
    recurrence: Option<RecurrenceRule>,
    vehicle: Option<VehicleRef>,
    assignee: Option<Assignee>,
    subtasks: Vec<Subtask>,
    recurrence_parent: Option<TaskId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task from a draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            task_type: draft.task_type,
            priority: draft.priority,
            status: TaskStatus::Pending,
            due_date: draft.due_date,
            recurrence: draft.recurrence,
            vehicle: draft.vehicle,
            assignee: draft.assignee,
            subtasks: draft.subtasks,
            recurrence_parent: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the free-text task type.
    #[must_use]
    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the recurrence rule, if any.
    #[must_use]
    pub const fn recurrence(&self) -> Option<&RecurrenceRule> {
        self.recurrence.as_ref()
    }

    /// Returns whether the task repeats.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Returns the recurrence interval, if recurring.
    #[must_use]
    pub fn recurrence_frequency(&self) -> Option<RecurrenceFrequency> {
        self.recurrence.map(|rule| rule.frequency())
    }

    /// Returns the targeted vehicle, if any.
    #[must_use]
    pub const fn vehicle(&self) -> Option<&VehicleRef> {
        self.vehicle.as_ref()
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Returns the checklist items in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the task this one was generated from, if any.
    #[must_use]
    pub const fn recurrence_parent(&self) -> Option<TaskId> {
        self.recurrence_parent
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the checklist completion summary.
    #[must_use]
    pub fn subtask_progress(&self) -> SubtaskProgress {
        SubtaskProgress {
            completed: self.subtasks.iter().filter(|s| s.is_completed()).count(),
            total: self.subtasks.len(),
        }
    }

    /// Returns `true` when the due date has passed and the task is still
    /// open.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.due_date < now
    }

    /// Overwrites the status and returns the previous one.
    ///
    /// No transition is rejected, including backward moves out of terminal
    /// statuses. [`TaskStatus::can_transition_to`] describes the nominal
    /// lifecycle for callers that want to warn.
    pub fn change_status(&mut self, status: TaskStatus, clock: &impl Clock) -> TaskStatus {
        let previous = self.status;
        self.status = status;
        self.touch(clock);
        previous
    }

    /// Moves the due date. Status is left untouched.
    pub fn reschedule(&mut self, due_date: DateTime<Utc>, clock: &impl Clock) {
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Sets the assignee, or clears it with `None`.
    pub fn assign(&mut self, assignee: Option<Assignee>, clock: &impl Clock) {
        self.assignee = assignee;
        self.touch(clock);
    }

    /// Replaces or removes the recurrence rule.
    pub fn set_recurrence(&mut self, rule: Option<RecurrenceRule>, clock: &impl Clock) {
        self.recurrence = rule;
        self.touch(clock);
    }

    /// Applies the task-detail form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when a replacement title
    /// is empty after trimming. The task is unchanged in that case.
    pub fn edit_details(
        &mut self,
        update: TaskDetailsUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let TaskDetailsUpdate {
            title,
            description,
            task_type,
            priority,
        } = update;

        let validated_title = title.as_deref().map(validate_title).transpose()?;
        if let Some(new_title) = validated_title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_type) = task_type {
            self.task_type = new_type;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        self.touch(clock);
        Ok(())
    }

    /// Appends a checklist item and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is empty
    /// after trimming.
    pub fn add_subtask(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<SubtaskId, TaskDomainError> {
        let subtask = Subtask::new(title)?;
        let subtask_id = subtask.id();
        self.subtasks.push(subtask);
        self.touch(clock);
        Ok(subtask_id)
    }

    /// Removes a checklist item and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskNotFound`] when the item does not
    /// belong to this task.
    pub fn remove_subtask(
        &mut self,
        subtask_id: SubtaskId,
        clock: &impl Clock,
    ) -> Result<Subtask, TaskDomainError> {
        let position = self
            .subtasks
            .iter()
            .position(|s| s.id() == subtask_id)
            .ok_or(TaskDomainError::SubtaskNotFound {
                task_id: self.id,
                subtask_id,
            })?;
        let removed = self.subtasks.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Flips a checklist item and returns its new completion flag.
    ///
    /// The task status is never changed, even when every item ends up
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskNotFound`] when the item does not
    /// belong to this task.
    pub fn toggle_subtask(
        &mut self,
        subtask_id: SubtaskId,
        clock: &impl Clock,
    ) -> Result<bool, TaskDomainError> {
        let task_id = self.id;
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|s| s.id() == subtask_id)
            .ok_or(TaskDomainError::SubtaskNotFound {
                task_id,
                subtask_id,
            })?;
        let is_completed = subtask.toggle();
        self.touch(clock);
        Ok(is_completed)
    }

    /// Builds the next occurrence of a completed recurring task.
    ///
    /// Returns `None` when the task is not recurring, is not completed, or
    /// the recurrence window has closed. The successor is pending, due one
    /// interval after this task, and carries fresh unchecked copies of the
    /// checklist.
    #[must_use]
    pub fn next_occurrence(&self, clock: &impl Clock) -> Option<Self> {
        let rule = self.recurrence?;
        if self.status != TaskStatus::Completed {
            return None;
        }
        let due_date = rule.next_due_date(self.due_date)?;
        let timestamp = clock.utc();

        Some(Self {
            id: TaskId::new(),
            title: self.title.clone(),
            description: self.description.clone(),
            task_type: self.task_type.clone(),
            priority: self.priority,
            status: TaskStatus::Pending,
            due_date,
            recurrence: Some(rule),
            vehicle: self.vehicle.clone(),
            assignee: self.assignee.clone(),
            subtasks: self.subtasks.iter().map(Subtask::fresh_copy).collect(),
            recurrence_parent: Some(self.id),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_title(raw: &str) -> Result<String, TaskDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(TaskDomainError::EmptyTaskTitle);
    }
    Ok(normalized.to_owned())
}
