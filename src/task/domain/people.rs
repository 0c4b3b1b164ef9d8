//! Users, roles, and the references tasks hold to them.

use super::{ParseUserRoleError, TaskDomainError, UserId, VehicleId, error::normalize_label};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds in the fleet organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Plans and assigns work.
    Manager,
    /// Performs maintenance tasks.
    Technician,
    /// Operates vehicles.
    Driver,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Technician => "technician",
            Self::Driver => "driver",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize_label(value).as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "technician" => Ok(Self::Technician),
            "driver" => Ok(Self::Driver),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Application user as supplied by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    role: UserRole,
}

impl User {
    /// Creates a user record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAssigneeName`] when the name is empty
    /// after trimming.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, TaskDomainError> {
        let raw_name: String = name.into();
        Ok(Self {
            id,
            name: non_empty(&raw_name, TaskDomainError::EmptyAssigneeName)?,
            role,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the reference stored on tasks assigned to this user.
    #[must_use]
    pub fn as_assignee(&self) -> Assignee {
        Assignee {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Reference from a task to the user responsible for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Assignee {
    id: UserId,
    name: String,
}

impl Assignee {
    /// Creates an assignee reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAssigneeName`] when the name is empty
    /// after trimming.
    pub fn new(id: UserId, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_name: String = name.into();
        Ok(Self {
            id,
            name: non_empty(&raw_name, TaskDomainError::EmptyAssigneeName)?,
        })
    }

    /// Returns the referenced user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the name captured at assignment time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reference from a task to the vehicle it targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VehicleRef {
    id: VehicleId,
    display_name: String,
}

impl VehicleRef {
    /// Creates a vehicle reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyVehicleName`] when the display name is
    /// empty after trimming.
    pub fn new(id: VehicleId, display_name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_name: String = display_name.into();
        Ok(Self {
            id,
            display_name: non_empty(&raw_name, TaskDomainError::EmptyVehicleName)?,
        })
    }

    /// Returns the referenced vehicle identifier.
    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    /// Returns the vehicle label shown in task lists.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

fn non_empty(raw: &str, error: TaskDomainError) -> Result<String, TaskDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(error);
    }
    Ok(normalized.to_owned())
}
