//! Shared fixtures for task unit tests.

use crate::task::domain::{Task, TaskDraft};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns 09:00 UTC on the given calendar day.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid test date")
}

/// Builds a pending task due on 2024-01-01.
pub fn pending_task(clock: &FixedClock) -> Task {
    let draft = TaskDraft::new("Inspect tyres", at(2024, 1, 1)).expect("valid draft");
    Task::new(draft, clock)
}
