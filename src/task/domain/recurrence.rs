//! Recurrence frequency and window types.

use super::{ParseRecurrenceFrequencyError, TaskDomainError, error::normalize_label};
use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interval between two occurrences of a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceFrequency {
    /// Every day.
    Daily,
    /// Every seven days.
    Weekly,
    /// Every fourteen days.
    Biweekly,
    /// Every calendar month.
    Monthly,
    /// Every three calendar months.
    Quarterly,
    /// Every calendar year.
    Yearly,
}

impl RecurrenceFrequency {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Advances `from` by exactly one interval.
    ///
    /// Month-based frequencies clamp to the last day of a shorter month, so
    /// January 31 advanced monthly lands on the last day of February.
    /// Returns `None` only when the result overflows the calendar range.
    #[must_use]
    pub fn advance(self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Daily => from.checked_add_days(Days::new(1)),
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Biweekly => from.checked_add_days(Days::new(14)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
            Self::Quarterly => from.checked_add_months(Months::new(3)),
            Self::Yearly => from.checked_add_months(Months::new(12)),
        }
    }
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RecurrenceFrequency {
    type Error = ParseRecurrenceFrequencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize_label(value).as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "fortnightly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annually" => Ok(Self::Yearly),
            _ => Err(ParseRecurrenceFrequencyError(value.to_owned())),
        }
    }
}

/// Recurrence configuration attached to a task.
///
/// A rule always carries a frequency; a task without a rule is not
/// recurring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecurrenceRule {
    frequency: RecurrenceFrequency,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    /// Creates an unbounded rule.
    #[must_use]
    pub const fn new(frequency: RecurrenceFrequency) -> Self {
        Self {
            frequency,
            starts_at: None,
            ends_at: None,
        }
    }

    /// Creates a rule bounded by an optional window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRecurrenceWindow`] when both bounds
    /// are set and `starts_at` is later than `ends_at`.
    pub fn bounded(
        frequency: RecurrenceFrequency,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskDomainError> {
        if let (Some(start), Some(end)) = (starts_at, ends_at)
            && start > end
        {
            return Err(TaskDomainError::InvalidRecurrenceWindow {
                starts_at: start,
                ends_at: end,
            });
        }
        Ok(Self {
            frequency,
            starts_at,
            ends_at,
        })
    }

    /// Returns the recurrence interval.
    #[must_use]
    pub const fn frequency(&self) -> RecurrenceFrequency {
        self.frequency
    }

    /// Returns the earliest date an occurrence may fall on.
    #[must_use]
    pub const fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }

    /// Returns the latest date an occurrence may fall on.
    #[must_use]
    pub const fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at
    }

    /// Computes the occurrence following `due_date`.
    ///
    /// Advances by one interval, then keeps advancing while the result is
    /// still before `starts_at`. Returns `None` once the result passes
    /// `ends_at`.
    #[must_use]
    pub fn next_due_date(&self, due_date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut next = self.frequency.advance(due_date)?;
        if let Some(start) = self.starts_at {
            while next < start {
                next = self.frequency.advance(next)?;
            }
        }
        match self.ends_at {
            Some(end) if next > end => None,
            _ => Some(next),
        }
    }
}
