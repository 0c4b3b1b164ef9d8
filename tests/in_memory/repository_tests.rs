//! Repository contract tests against the in-memory adapter.

use super::helpers::task_with_subtasks;
use fleet_tasks::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Assignee, Task, TaskDraft, TaskStatus, UserId, VehicleId, VehicleRef},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(
    repository: InMemoryTaskRepository,
) -> eyre::Result<()> {
    let task = task_with_subtasks("Fit tow bar", &[])?;
    repository.store(&task).await?;

    let result = repository.store(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected duplicate error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_requires_existing_task(repository: InMemoryTaskRepository) -> eyre::Result<()> {
    let task = task_with_subtasks("Fit tow bar", &[])?;

    let result = repository.update(&task).await;

    eyre::ensure!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_index_follows_checklist_edits(
    repository: InMemoryTaskRepository,
) -> eyre::Result<()> {
    let mut task = task_with_subtasks("Service", &["Filter"])?;
    repository.store(&task).await?;
    let original = task
        .subtasks()
        .first()
        .ok_or_else(|| eyre::eyre!("missing subtask"))?
        .id();

    task.remove_subtask(original, &DefaultClock)?;
    let added = task.add_subtask("Belt", &DefaultClock)?;
    repository.update(&task).await?;

    eyre::ensure!(repository.find_by_subtask_id(original).await?.is_none());
    let owner = repository
        .find_by_subtask_id(added)
        .await?
        .ok_or_else(|| eyre::eyre!("new subtask not indexed"))?;
    eyre::ensure!(owner.id() == task.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_subtasks(repository: InMemoryTaskRepository) -> eyre::Result<()> {
    let task = task_with_subtasks("Service", &["Filter", "Belt"])?;
    repository.store(&task).await?;

    repository.delete(task.id()).await?;

    eyre::ensure!(repository.is_empty()?);
    for subtask in task.subtasks() {
        eyre::ensure!(repository.find_by_subtask_id(subtask.id()).await?.is_none());
    }
    let again = repository.delete(task.id()).await;
    eyre::ensure!(matches!(again, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_combines_filter_criteria(repository: InMemoryTaskRepository) -> eyre::Result<()> {
    let technician = Assignee::new(UserId::new(), "Lee")?;
    let van = VehicleRef::new(VehicleId::new(), "Van 3")?;

    let mut on_van = task_with_subtasks("Van brakes", &[])?;
    on_van.assign(Some(technician.clone()), &DefaultClock);
    let mut on_other = task_with_subtasks("Truck brakes", &[])?;
    on_other.assign(Some(technician.clone()), &DefaultClock);
    on_other.change_status(TaskStatus::InProgress, &DefaultClock);
    let unassigned = task_with_subtasks("Wash", &[])?;

    let van_task = Task::new(
        TaskDraft::new("Van tyres", on_van.due_date())?
            .with_vehicle(van.clone())
            .with_assignee(technician.clone()),
        &DefaultClock,
    );

    for task in [&on_van, &on_other, &unassigned, &van_task] {
        repository.store(task).await?;
    }

    let assigned = repository
        .list(&TaskFilter::new().with_assignee(technician.id()))
        .await?;
    let assigned_pending = repository
        .list(
            &TaskFilter::new()
                .with_assignee(technician.id())
                .with_status(TaskStatus::Pending),
        )
        .await?;
    let for_van = repository
        .list(&TaskFilter::new().with_vehicle(van.id()))
        .await?;

    eyre::ensure!(assigned.len() == 3);
    eyre::ensure!(assigned_pending.len() == 2);
    eyre::ensure!(for_van.len() == 1);
    eyre::ensure!(for_van.first().map(|t| t.id()) == Some(van_task.id()));
    Ok(())
}
