//! When steps for kanban board BDD scenarios.

use super::world::{KanbanWorld, run_async};
use blitztask::board::{
    domain::{DragHandle, DragOutcome, DropTarget, InsertPosition, TaskId},
    services::{AddColumnRequest, AddTaskRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"task "{task}" is moved from "{source}" to "{target}""#)]
fn move_task(
    world: &mut KanbanWorld,
    task: String,
    source: String,
    target: String,
) -> Result<(), eyre::Report> {
    let outcome = world.service.move_task(
        world.task_id(&task)?,
        world.column_id(&source)?,
        world.column_id(&target)?,
        None,
    )?;
    eyre::ensure!(outcome.is_applied(), "move of {task:?} was skipped: {outcome:?}");
    Ok(())
}

#[when(r#"an unknown task is moved from "{source}" to "{target}""#)]
fn move_unknown_task(
    world: &mut KanbanWorld,
    source: String,
    target: String,
) -> Result<(), eyre::Report> {
    let outcome = world.service.move_task(
        TaskId::new(),
        world.column_id(&source)?,
        world.column_id(&target)?,
        None,
    )?;
    eyre::ensure!(!outcome.is_applied(), "move of an unknown task was applied");
    Ok(())
}

#[when(r#"a column "{name}" is added after "{anchor}""#)]
fn add_column_after(
    world: &mut KanbanWorld,
    name: String,
    anchor: String,
) -> Result<(), eyre::Report> {
    let anchor_id = world.column_id(&anchor)?;
    let request = AddColumnRequest::new(name.as_str()).placed(InsertPosition::After, anchor_id);
    let created = run_async(world.service.add_column(request))
    .wrap_err("add column in scenario")?;
    world.columns.insert(name, created.id());
    Ok(())
}

#[when(r#"a task "{name}" is added to "{column}""#)]
fn add_task(world: &mut KanbanWorld, name: String, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column_id(&column)?;
    let created = run_async(
        world
            .service
            .add_task(AddTaskRequest::new(column_id, name.as_str())),
    )
    .wrap_err("add task in scenario")?;
    world.tasks.insert(name, created.id());
    Ok(())
}

#[when(r#"task "{task}" starts dragging"#)]
fn start_drag(world: &mut KanbanWorld, task: String) -> Result<(), eyre::Report> {
    let started = world.service.drag_start(DragHandle::Task(world.task_id(&task)?))?;
    eyre::ensure!(started, "drag of {task:?} did not start");
    Ok(())
}

#[when(r#"the drag passes over column "{column}""#)]
fn drag_over_column(world: &mut KanbanWorld, column: String) -> Result<(), eyre::Report> {
    let target = DropTarget::ColumnBody(world.column_id(&column)?);
    let outcome = world.service.drag_over(target)?;
    eyre::ensure!(
        !matches!(outcome, DragOutcome::Discarded(_)),
        "drag over {column:?} was discarded"
    );
    Ok(())
}

#[when(r#"the drag passes over task "{task}""#)]
fn drag_over_task(world: &mut KanbanWorld, task: String) -> Result<(), eyre::Report> {
    let target = DropTarget::Task(world.task_id(&task)?);
    let outcome = world.service.drag_over(target)?;
    eyre::ensure!(
        !matches!(outcome, DragOutcome::Discarded(_)),
        "drag over {task:?} was discarded"
    );
    Ok(())
}

#[when(r#"the drag is dropped on column "{column}""#)]
fn drop_on_column(world: &mut KanbanWorld, column: String) -> Result<(), eyre::Report> {
    let target = DropTarget::ColumnBody(world.column_id(&column)?);
    let outcome = world.service.drag_end(Some(target))?;
    eyre::ensure!(
        matches!(outcome, DragOutcome::Applied | DragOutcome::Unchanged),
        "drop on {column:?} did not land: {outcome:?}"
    );
    Ok(())
}

#[when("the drag is cancelled")]
fn cancel_drag(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    let outcome = world.service.drag_cancel()?;
    eyre::ensure!(outcome == DragOutcome::Reverted, "cancel did not revert: {outcome:?}");
    Ok(())
}

#[when(r#"column "{column}" is deleted"#)]
fn delete_column(world: &mut KanbanWorld, column: String) -> Result<(), eyre::Report> {
    let outcome = world.service.delete_column(world.column_id(&column)?)?;
    eyre::ensure!(outcome.is_applied(), "delete of {column:?} was skipped: {outcome:?}");
    Ok(())
}
