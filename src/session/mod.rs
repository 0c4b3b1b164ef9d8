//! Current-user context passed explicitly to the presentation layer.
//!
//! The authentication service builds a [`SessionContext`] and hands it to
//! whoever renders task actions. The helpers here only gate what the UI
//! offers; task services never consult them.

use crate::task::{
    domain::{Task, User, UserId, UserRole},
    services::eligible_assignees,
};

/// Identity and role of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    current_user: User,
}

impl SessionContext {
    /// Creates a context for the signed-in user.
    #[must_use]
    pub const fn new(current_user: User) -> Self {
        Self { current_user }
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn current_user(&self) -> &User {
        &self.current_user
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.current_user.id()
    }

    /// Returns the signed-in user's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.current_user.role()
    }

    /// Whether the user may create, delete, assign, and reschedule tasks.
    #[must_use]
    pub const fn can_manage_tasks(&self) -> bool {
        matches!(self.role(), UserRole::Admin | UserRole::Manager)
    }

    /// Whether the user may change the status of `task`.
    ///
    /// Managers may update any task; everyone else only tasks assigned to
    /// them.
    #[must_use]
    pub fn can_update_status(&self, task: &Task) -> bool {
        self.can_manage_tasks()
            || task
                .assignee()
                .is_some_and(|assignee| assignee.id() == self.user_id())
    }

    /// Returns the assignee candidates to show this user.
    ///
    /// Empty unless the user may manage tasks.
    #[must_use]
    pub fn assignee_candidates<'a>(&self, pool: &'a [User]) -> Vec<&'a User> {
        if self.can_manage_tasks() {
            eligible_assignees(pool)
        } else {
            Vec::new()
        }
    }
}
