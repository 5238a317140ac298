//! Given steps for kanban board BDD scenarios.

use super::world::{KanbanWorld, names, run_async};
use blitztask::board::domain::{Board, Column, ColumnColor, ColumnTitle, Task, TaskDetails};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a board where "{todo}" has "{todos}", "{doing}" has "{doings}" and "{done}" is empty"#)]
fn board_with_three_columns(
    world: &mut KanbanWorld,
    todo: String,
    todos: String,
    doing: String,
    doings: String,
    done: String,
) -> Result<(), eyre::Report> {
    let mut named_tasks = Vec::new();
    let mut columns = Vec::new();
    for (name, task_list) in [(todo, todos), (doing, doings), (done, String::new())] {
        let mut tasks = Vec::new();
        for task_name in names(&task_list) {
            let task = Task::new(TaskDetails::new(task_name.as_str())?, &DefaultClock);
            named_tasks.push((task_name, task.id()));
            tasks.push(task);
        }
        let column = Column::new(ColumnTitle::new(name.as_str())?, ColumnColor::default())
            .with_tasks(tasks);
        columns.push((name, column));
    }

    let column_ids: Vec<_> = columns
        .iter()
        .map(|(name, column)| (name.clone(), column.id()))
        .collect();
    let board = Board::from_columns(columns.into_iter().map(|(_, column)| column))?;

    *world = KanbanWorld::with_board(board);
    world.columns.extend(column_ids);
    world.tasks.extend(named_tasks);
    let loaded = run_async(world.service.load()).wrap_err("load board for scenario")?;
    world.initial_board = Some(loaded);
    Ok(())
}
