//! Assignment resolver binding tasks to at most one user.

use super::{TaskLifecycleResult, TaskServiceConfig, lifecycle::load_task};
use crate::task::{
    domain::{Task, TaskId, User, UserRole},
    ports::TaskRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Returns the users offered in the assignee picker.
///
/// Only technicians are eligible. [`TaskAssignmentService::assign`] does not
/// apply this rule; callers filter candidates with it before assigning.
pub fn eligible_assignees<'a>(pool: impl IntoIterator<Item = &'a User>) -> Vec<&'a User> {
    pool.into_iter()
        .filter(|user| user.role() == UserRole::Technician)
        .collect()
}

/// Task assignment orchestration service.
#[derive(Clone)]
pub struct TaskAssignmentService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: TaskServiceConfig,
}

impl<R, C> TaskAssignmentService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service with the default configuration.
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

    /// Binds a task to `user`, or unbinds it when `user` is `None`.
    ///
    /// The user's role is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is missing,
    /// or [`TaskLifecycleError::Repository`] when persistence fails.
    ///
    /// [`TaskLifecycleError::TaskNotFound`]: super::TaskLifecycleError::TaskNotFound
    /// [`TaskLifecycleError::Repository`]: super::TaskLifecycleError::Repository
    pub async fn assign(&self, task_id: TaskId, user: Option<&User>) -> TaskLifecycleResult<Task> {
        let mut task = load_task(&*self.repository, task_id).await?;
        task.assign(user.map(User::as_assignee), &*self.clock);

        let outcome = self.repository.update(&task).await;
        self.config.commit_policy.settle("assign", task_id, outcome)?;
        match task.assignee() {
            Some(assignee) => {
                tracing::debug!(%task_id, assignee_id = %assignee.id(), "assigned task");
            }
            None => tracing::debug!(%task_id, "unassigned task"),
        }
        Ok(task)
    }
}
