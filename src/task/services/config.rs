//! Configuration for task lifecycle services.

use crate::task::{
    domain::TaskId,
    ports::{TaskRepositoryError, TaskRepositoryResult},
};

/// How a service reacts when the repository rejects a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Log the failure and hand the mutated task back anyway.
    #[default]
    BestEffort,
    /// Return the failure to the caller.
    Strict,
}

impl CommitPolicy {
    /// Resolves the outcome of a repository write under this policy.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged under [`CommitPolicy::Strict`].
    pub fn settle(
        self,
        operation: &'static str,
        task_id: TaskId,
        outcome: TaskRepositoryResult<()>,
    ) -> Result<(), TaskRepositoryError> {
        match (self, outcome) {
            (_, Ok(())) => Ok(()),
            (Self::BestEffort, Err(err)) => {
                tracing::warn!(
                    %task_id,
                    operation,
                    error = %err,
                    "discarding failed task commit"
                );
                Ok(())
            }
            (Self::Strict, Err(err)) => Err(err),
        }
    }
}

/// Configuration shared by task services.
///
/// # Examples
///
/// ```
/// use fleet_tasks::task::services::{CommitPolicy, TaskServiceConfig};
///
/// let config = TaskServiceConfig::default();
/// assert_eq!(config.commit_policy, CommitPolicy::BestEffort);
///
/// let strict = TaskServiceConfig::strict();
/// assert_eq!(strict.commit_policy, CommitPolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskServiceConfig {
    /// Reaction to failed repository writes.
    pub commit_policy: CommitPolicy,
}

impl TaskServiceConfig {
    /// Creates a configuration that surfaces every commit failure.
    ///
    /// Useful for tests and for hosts that want to show a failure alert.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            commit_policy: CommitPolicy::Strict,
        }
    }
}
