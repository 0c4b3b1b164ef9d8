//! Given steps for recurring task BDD scenarios.

use super::world::{RecurrenceWorld, parse_date, run_async};
use eyre::WrapErr;
use fleet_tasks::task::{
    domain::{RecurrenceFrequency, RecurrenceRule},
    services::CreateTaskRequest,
};
use rstest_bdd_macros::given;

#[given(r#"a "{frequency}" recurring task "{title}" due on "{date}""#)]
fn recurring_task(
    world: &mut RecurrenceWorld,
    frequency: String,
    title: String,
    date: String,
) -> Result<(), eyre::Report> {
    let parsed = RecurrenceFrequency::try_from(frequency.as_str())
        .map_err(|err| eyre::eyre!("invalid frequency in scenario: {err}"))?;
    let request = CreateTaskRequest::new(title, parse_date(&date)?)
        .with_recurrence(RecurrenceRule::new(parsed));
    let created =
        run_async(world.service.create_task(request)).wrap_err("create recurring task")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"a one-off task "{title}" due on "{date}""#)]
fn one_off_task(
    world: &mut RecurrenceWorld,
    title: String,
    date: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, parse_date(&date)?);
    let created = run_async(world.service.create_task(request)).wrap_err("create one-off task")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"the task has subtask "{title}""#)]
fn task_has_subtask(world: &mut RecurrenceWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let updated =
        run_async(world.service.add_subtask(task_id, title)).wrap_err("add scenario subtask")?;
    world.current_task = Some(updated);
    Ok(())
}

#[given(r#"subtask "{title}" is checked off"#)]
fn subtask_checked_off(world: &mut RecurrenceWorld, title: String) -> Result<(), eyre::Report> {
    let subtask_id = world
        .task()?
        .subtasks()
        .iter()
        .find(|subtask| subtask.title() == title)
        .map(|subtask| subtask.id())
        .ok_or_else(|| eyre::eyre!("no subtask titled {title}"))?;
    let updated = run_async(world.service.toggle_subtask(subtask_id))
        .wrap_err("toggle scenario subtask")?;
    world.current_task = Some(updated);
    Ok(())
}
