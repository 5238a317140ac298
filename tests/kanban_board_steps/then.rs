//! Then steps for kanban board BDD scenarios.

use std::collections::HashSet;

use super::world::{KanbanWorld, names};
use rstest_bdd_macros::then;

#[then(r#"column "{column}" holds "{tasks}""#)]
fn column_holds(world: &KanbanWorld, column: String, tasks: String) -> Result<(), eyre::Report> {
    let actual = world.task_names_in(&column)?;
    let expected = names(&tasks);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected column {column:?} to hold {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"column "{column}" is empty"#)]
fn column_is_empty(world: &KanbanWorld, column: String) -> Result<(), eyre::Report> {
    let actual = world.task_names_in(&column)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected column {column:?} to be empty, found {actual:?}"));
    }
    Ok(())
}

#[then("every task appears exactly once")]
fn every_task_once(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let board = world.service.snapshot()?;
    board.verify_partition()?;

    let on_board: HashSet<_> = board
        .columns()
        .iter()
        .flat_map(|column| column.task_ids())
        .collect();
    let named: HashSet<_> = world.tasks.values().copied().collect();
    if on_board != named {
        return Err(eyre::eyre!(
            "board holds {} tasks but the scenario named {}",
            on_board.len(),
            named.len()
        ));
    }
    Ok(())
}

#[then("the board is unchanged")]
fn board_unchanged(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let initial = world
        .initial_board
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing initial board in scenario world"))?;
    if world.service.snapshot()? != *initial {
        return Err(eyre::eyre!("board changed during the scenario"));
    }
    Ok(())
}

#[then(r#"the column order is "{order}""#)]
fn column_order_is(world: &KanbanWorld, order: String) -> Result<(), eyre::Report> {
    let expected = names(&order)
        .iter()
        .map(|name| world.column_id(name))
        .collect::<Result<Vec<_>, _>>()?;
    let actual = world.service.snapshot()?.column_ids();
    if actual != expected {
        return Err(eyre::eyre!("expected column order {order:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the backend recorded {count:usize} created task")]
fn backend_recorded_tasks(world: &KanbanWorld, count: usize) -> Result<(), eyre::Report> {
    let created = world.backend.created_task_ids()?;
    let stored = world.backend.stored_board()?;
    if created.len() != count {
        return Err(eyre::eyre!("expected {count} created tasks, found {}", created.len()));
    }
    if let Some(missing) = created.iter().find(|id| stored.task(**id).is_none()) {
        return Err(eyre::eyre!("created task {missing} is missing from the backend board"));
    }
    Ok(())
}

#[then("the board holds {count:usize} task")]
fn board_holds_tasks(world: &KanbanWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.service.snapshot()?.task_count();
    if actual != count {
        return Err(eyre::eyre!("expected {count} tasks on the board, found {actual}"));
    }
    Ok(())
}
