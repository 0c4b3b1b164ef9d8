//! Then steps for recurring task BDD scenarios.

use super::world::{RecurrenceWorld, parse_date, run_async};
use fleet_tasks::task::{
    domain::{Task, TaskStatus},
    ports::TaskRepository,
};
use rstest_bdd_macros::then;

fn successor(world: &RecurrenceWorld) -> Result<&Task, eyre::Report> {
    world
        .successor
        .as_ref()
        .ok_or_else(|| eyre::eyre!("next recurring task was never requested"))?
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no successor task was produced"))
}

fn expect_status(actual: TaskStatus, expected: &str) -> Result<(), eyre::Report> {
    let expected_status = TaskStatus::try_from(expected)
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    if actual != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            actual.as_str()
        ));
    }
    Ok(())
}

#[then(r#"a successor task is due on "{date}""#)]
fn successor_due_on(world: &RecurrenceWorld, date: String) -> Result<(), eyre::Report> {
    let expected = parse_date(&date)?;
    let actual = successor(world)?.due_date();
    if actual != expected {
        return Err(eyre::eyre!("expected due date {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the successor task status is "{status}""#)]
fn successor_status(world: &RecurrenceWorld, status: String) -> Result<(), eyre::Report> {
    expect_status(successor(world)?.status(), &status)
}

#[then("the successor task has {count:usize} unchecked subtasks")]
fn successor_unchecked_subtasks(world: &RecurrenceWorld, count: usize) -> Result<(), eyre::Report> {
    let subtasks = successor(world)?.subtasks();
    if subtasks.len() != count || subtasks.iter().any(|s| s.is_completed()) {
        return Err(eyre::eyre!(
            "expected {count} unchecked subtasks, found {subtasks:?}"
        ));
    }
    Ok(())
}

#[then("no successor task is produced")]
fn no_successor(world: &RecurrenceWorld) -> Result<(), eyre::Report> {
    match world.successor {
        Some(None) => Ok(()),
        Some(Some(ref task)) => Err(eyre::eyre!("unexpected successor {}", task.id())),
        None => Err(eyre::eyre!("next recurring task was never requested")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status(world: &RecurrenceWorld, status: String) -> Result<(), eyre::Report> {
    expect_status(world.task()?.status(), &status)
}

#[then("its subtasks can no longer be found")]
fn subtasks_gone(world: &RecurrenceWorld) -> Result<(), eyre::Report> {
    let task = world
        .deleted_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was deleted"))?;
    for subtask in task.subtasks() {
        let owner = run_async(world.repository.find_by_subtask_id(subtask.id()))
            .map_err(|err| eyre::eyre!("subtask lookup failed: {err}"))?;
        if owner.is_some() {
            return Err(eyre::eyre!("subtask {} still stored", subtask.id()));
        }
    }
    Ok(())
}
