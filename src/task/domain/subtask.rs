//! Checklist items owned by a task.

use super::{SubtaskId, TaskDomainError};
use serde::Serialize;

/// Checklist item owned exclusively by one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    is_completed: bool,
}

impl Subtask {
    /// Creates an incomplete subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = title.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptySubtaskTitle);
        }
        Ok(Self {
            id: SubtaskId::new(),
            title: normalized.to_owned(),
            is_completed: false,
        })
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the item has been checked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Flips the completion flag and returns the new value.
    pub const fn toggle(&mut self) -> bool {
        self.is_completed = !self.is_completed;
        self.is_completed
    }

    /// Returns an unchecked copy with a fresh identifier.
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        Self {
            id: SubtaskId::new(),
            title: self.title.clone(),
            is_completed: false,
        }
    }
}

/// Completion summary of a task's checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtaskProgress {
    /// Number of checked items.
    pub completed: usize,
    /// Number of items.
    pub total: usize,
}

impl SubtaskProgress {
    /// Returns `true` when the checklist is non-empty and fully checked.
    ///
    /// The owning task is not completed automatically; the UI offers that
    /// as a manual step.
    #[must_use]
    pub const fn is_all_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// Returns the number of unchecked items.
    #[must_use]
    pub const fn remaining(self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}
