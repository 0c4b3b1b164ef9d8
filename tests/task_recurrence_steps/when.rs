//! When steps for recurring task BDD scenarios.

use super::world::{RecurrenceWorld, run_async};
use eyre::WrapErr;
use fleet_tasks::task::services::ChangeStatusRequest;
use rstest_bdd_macros::when;

#[when(r#"the task is marked "{status}""#)]
fn task_marked(world: &mut RecurrenceWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let updated = run_async(
        world
            .service
            .change_status(ChangeStatusRequest::new(task_id, status)),
    )
    .wrap_err("change scenario task status")?;
    world.current_task = Some(updated);
    Ok(())
}

#[when("the next recurring task is requested")]
fn next_recurring_task_requested(world: &mut RecurrenceWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let successor = run_async(world.service.create_next_recurring_task(task_id))
        .wrap_err("request next recurring task")?;
    world.successor = Some(successor);
    Ok(())
}

#[when("every subtask is checked off")]
fn every_subtask_checked_off(world: &mut RecurrenceWorld) -> Result<(), eyre::Report> {
    let subtask_ids: Vec<_> = world
        .task()?
        .subtasks()
        .iter()
        .filter(|subtask| !subtask.is_completed())
        .map(|subtask| subtask.id())
        .collect();
    for subtask_id in subtask_ids {
        let updated = run_async(world.service.toggle_subtask(subtask_id))
            .wrap_err("toggle scenario subtask")?;
        world.current_task = Some(updated);
    }
    Ok(())
}

#[when("the task is deleted")]
fn task_deleted(world: &mut RecurrenceWorld) -> Result<(), eyre::Report> {
    let task = world
        .current_task
        .take()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    run_async(world.service.delete_task(task.id())).wrap_err("delete scenario task")?;
    world.deleted_task = Some(task);
    Ok(())
}
