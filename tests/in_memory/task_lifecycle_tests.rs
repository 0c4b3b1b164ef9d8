//! In-memory integration tests for task lifecycle flows.

use std::sync::Arc;

use super::helpers::day;
use fleet_tasks::{
    session::SessionContext,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{RecurrenceFrequency, RecurrenceRule, TaskStatus, User, UserId, UserRole},
        ports::TaskFilter,
        services::{
            ChangeStatusRequest, CreateTaskRequest, TaskAssignmentService, TaskLifecycleService,
        },
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

struct Fleet {
    repository: Arc<InMemoryTaskRepository>,
    lifecycle: TestService,
    assignment: TaskAssignmentService<InMemoryTaskRepository, DefaultClock>,
}

#[fixture]
fn fleet() -> Fleet {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    Fleet {
        lifecycle: TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock)),
        assignment: TaskAssignmentService::new(Arc::clone(&repository), clock),
        repository,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_task_rolls_forward_with_fresh_checklist(fleet: Fleet) -> eyre::Result<()> {
    let request = CreateTaskRequest::new("Walkaround inspection", day(2024, 1, 1)?)
        .with_task_type("inspection")
        .with_recurrence(RecurrenceRule::new(RecurrenceFrequency::Weekly))
        .with_subtasks(["Lights".to_owned(), "Fluids".to_owned()]);
    let task = fleet.lifecycle.create_task(request).await?;
    let lights = task
        .subtasks()
        .first()
        .ok_or_else(|| eyre::eyre!("missing subtask"))?
        .id();

    fleet.lifecycle.toggle_subtask(lights).await?;
    fleet
        .lifecycle
        .change_status(ChangeStatusRequest::new(task.id(), "completed"))
        .await?;
    let successor = fleet
        .lifecycle
        .create_next_recurring_task(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("expected successor"))?;

    eyre::ensure!(successor.due_date() == day(2024, 1, 8)?);
    eyre::ensure!(successor.status() == TaskStatus::Pending);
    eyre::ensure!(successor.subtasks().len() == 2);
    eyre::ensure!(successor.subtasks().iter().all(|s| !s.is_completed()));
    eyre::ensure!(successor.recurrence_parent() == Some(task.id()));

    let pending = fleet
        .lifecycle
        .list_tasks(&TaskFilter::new().with_status(TaskStatus::Pending))
        .await?;
    eyre::ensure!(pending.len() == 1);
    eyre::ensure!(fleet.repository.len()? == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_assigns_a_technician_from_the_pool(fleet: Fleet) -> eyre::Result<()> {
    let manager = User::new(UserId::new(), "Morgan", UserRole::Manager)?;
    let pool = vec![
        User::new(UserId::new(), "Dana", UserRole::Driver)?,
        User::new(UserId::new(), "Toni", UserRole::Technician)?,
    ];
    let session = SessionContext::new(manager);
    let task = fleet
        .lifecycle
        .create_task(CreateTaskRequest::new("Swap battery", day(2024, 3, 1)?))
        .await?;

    let candidates = session.assignee_candidates(&pool);
    let chosen = candidates
        .first()
        .copied()
        .ok_or_else(|| eyre::eyre!("no eligible technician"))?;
    let assigned = fleet.assignment.assign(task.id(), Some(chosen)).await?;

    eyre::ensure!(candidates.len() == 1);
    eyre::ensure!(assigned.assignee().map(|a| a.name()) == Some("Toni"));

    let technician_session = SessionContext::new(chosen.clone());
    eyre::ensure!(technician_session.can_update_status(&assigned));
    Ok(())
}
