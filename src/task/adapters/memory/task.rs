//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{SubtaskId, Task, TaskId},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    subtask_index: HashMap<SubtaskId, TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.len())
    }

    /// Returns `true` when no task is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn index_subtasks(state: &mut InMemoryTaskState, task: &Task) {
    for subtask in task.subtasks() {
        state.subtask_index.insert(subtask.id(), task.id());
    }
}

/// Drops every index entry pointing at the task.
fn unindex_subtasks(state: &mut InMemoryTaskState, task_id: TaskId) {
    state.subtask_index.retain(|_, owner| *owner != task_id);
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        index_subtasks(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }

        // Subtasks may have been added or removed since the last write.
        unindex_subtasks(&mut state, task.id());
        index_subtasks(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        unindex_subtasks(&mut state, id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_subtask_id(&self, id: SubtaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let task = state
            .subtask_index
            .get(&id)
            .and_then(|task_id| state.tasks.get(task_id))
            .cloned();
        Ok(task)
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.due_date(), task.id()));
        Ok(tasks)
    }
}
