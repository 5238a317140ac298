//! Tests for drop-target resolution and drag sessions.

use super::fixtures::{SampleBoard, sample};
use crate::board::domain::{
    ColumnId, DragHandle, DragOutcome, DragSession, DropLocation, DropTarget, TaskId,
};
use eyre::{OptionExt, ensure};
use rstest::rstest;

#[rstest]
fn column_targets_resolve_to_end_of_column(sample: SampleBoard) {
    let expected = Some(DropLocation {
        column_id: sample.todo,
        index: 2,
    });

    assert_eq!(sample.board.resolve_drop_target(DropTarget::Column(sample.todo)), expected);
    assert_eq!(
        sample.board.resolve_drop_target(DropTarget::ColumnBody(sample.todo)),
        expected
    );
}

#[rstest]
fn task_target_resolves_to_its_position(sample: SampleBoard) {
    assert_eq!(
        sample.board.resolve_drop_target(DropTarget::Task(sample.task_b)),
        Some(DropLocation {
            column_id: sample.todo,
            index: 1,
        })
    );
}

#[rstest]
fn unknown_targets_do_not_resolve(sample: SampleBoard) {
    assert!(sample.board.resolve_drop_target(DropTarget::Task(TaskId::new())).is_none());
    assert!(
        sample
            .board
            .resolve_drop_target(DropTarget::ColumnBody(ColumnId::new()))
            .is_none()
    );
}

#[rstest]
fn start_requires_handle_on_board(sample: SampleBoard) {
    assert!(DragSession::start(&sample.board, DragHandle::Task(TaskId::new())).is_none());
    assert!(DragSession::start(&sample.board, DragHandle::Column(ColumnId::new())).is_none());
    assert!(DragSession::start(&sample.board, DragHandle::Task(sample.task_a)).is_some());
}

#[rstest]
fn drag_over_other_column_moves_task_optimistically(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;

    let outcome = session.over(&mut sample.board, DropTarget::Task(sample.task_c));

    ensure!(outcome == DragOutcome::Applied);
    ensure!(sample.ids_in(sample.doing) == vec![sample.task_a, sample.task_c]);
    ensure!(sample.ids_in(sample.todo) == vec![sample.task_b]);
    Ok(())
}

#[rstest]
fn drag_over_own_column_changes_nothing(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;
    let before = sample.board.clone();

    let outcome = session.over(&mut sample.board, DropTarget::Task(sample.task_b));

    ensure!(outcome == DragOutcome::Unchanged);
    ensure!(sample.board == before);
    Ok(())
}

#[rstest]
fn drag_over_unresolved_target_is_discarded(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;
    let before = sample.board.clone();
    let ghost = DropTarget::ColumnBody(ColumnId::new());

    let outcome = session.over(&mut sample.board, ghost);

    ensure!(outcome == DragOutcome::Discarded(ghost));
    ensure!(sample.board == before);
    Ok(())
}

#[rstest]
fn repeated_drag_over_converges_on_final_column(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;

    for target in [sample.doing, sample.done, sample.doing] {
        let hover = session.over(&mut sample.board, DropTarget::ColumnBody(target));
        ensure!(hover == DragOutcome::Applied);
    }
    let outcome = session.end(&mut sample.board, Some(DropTarget::ColumnBody(sample.doing)));

    ensure!(matches!(outcome, DragOutcome::Applied | DragOutcome::Unchanged));
    let occurrences = sample
        .board
        .columns()
        .iter()
        .flat_map(|column| column.task_ids())
        .filter(|id| *id == sample.task_a)
        .count();
    ensure!(occurrences == 1);
    ensure!(sample.ids_in(sample.doing) == vec![sample.task_c, sample.task_a]);
    sample.board.verify_partition()?;
    Ok(())
}

#[rstest]
fn drag_end_reorders_within_column(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_b))
        .ok_or_eyre("drag should start")?;

    let outcome = session.end(&mut sample.board, Some(DropTarget::Task(sample.task_a)));

    ensure!(outcome == DragOutcome::Applied);
    ensure!(sample.ids_in(sample.todo) == vec![sample.task_b, sample.task_a]);
    Ok(())
}

#[rstest]
fn drag_end_without_hover_moves_across_columns(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_c))
        .ok_or_eyre("drag should start")?;

    let outcome = session.end(&mut sample.board, Some(DropTarget::Column(sample.done)));

    ensure!(outcome == DragOutcome::Applied);
    ensure!(sample.ids_in(sample.done) == vec![sample.task_c]);
    ensure!(sample.ids_in(sample.doing).is_empty());
    Ok(())
}

#[rstest]
fn drop_outside_any_target_reverts_hover_moves(mut sample: SampleBoard) -> eyre::Result<()> {
    let original = sample.board.clone();
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;
    let hover = session.over(&mut sample.board, DropTarget::ColumnBody(sample.done));
    ensure!(hover == DragOutcome::Applied);
    ensure!(sample.board != original);

    let outcome = session.end(&mut sample.board, None);

    ensure!(outcome == DragOutcome::Reverted);
    ensure!(sample.board == original);
    Ok(())
}

#[rstest]
fn drop_on_unresolved_target_reverts(mut sample: SampleBoard) -> eyre::Result<()> {
    let original = sample.board.clone();
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;
    let hover = session.over(&mut sample.board, DropTarget::Column(sample.doing));
    ensure!(hover == DragOutcome::Applied);

    let outcome = session.end(&mut sample.board, Some(DropTarget::Task(TaskId::new())));

    ensure!(outcome == DragOutcome::Reverted);
    ensure!(sample.board == original);
    Ok(())
}

#[rstest]
fn cancel_restores_board(mut sample: SampleBoard) -> eyre::Result<()> {
    let original = sample.board.clone();
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_b))
        .ok_or_eyre("drag should start")?;
    let hover = session.over(&mut sample.board, DropTarget::Task(sample.task_c));
    ensure!(hover == DragOutcome::Applied);

    let outcome = session.cancel(&mut sample.board);

    ensure!(outcome == DragOutcome::Reverted);
    ensure!(sample.board == original);
    Ok(())
}

#[rstest]
fn cancel_keeps_changes_made_to_other_tasks(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;
    let hover = session.over(&mut sample.board, DropTarget::ColumnBody(sample.done));
    ensure!(hover == DragOutcome::Applied);
    ensure!(sample.board.delete_task(sample.task_c).is_applied());
    ensure!(
        sample
            .board
            .move_task(sample.task_b, sample.todo, sample.doing, None)
            .is_applied()
    );

    let outcome = session.cancel(&mut sample.board);

    ensure!(outcome == DragOutcome::Reverted);
    ensure!(sample.ids_in(sample.todo) == vec![sample.task_a]);
    ensure!(sample.ids_in(sample.doing) == vec![sample.task_b]);
    ensure!(sample.ids_in(sample.done).is_empty());
    ensure!(sample.board.task(sample.task_c).is_none());
    sample.board.verify_partition()?;
    Ok(())
}

#[rstest]
fn cancel_after_dragged_task_was_deleted_leaves_board_alone(
    mut sample: SampleBoard,
) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Task(sample.task_a))
        .ok_or_eyre("drag should start")?;
    let hover = session.over(&mut sample.board, DropTarget::ColumnBody(sample.doing));
    ensure!(hover == DragOutcome::Applied);
    ensure!(sample.board.delete_task(sample.task_a).is_applied());
    let before = sample.board.clone();

    let outcome = session.cancel(&mut sample.board);

    ensure!(outcome == DragOutcome::Reverted);
    ensure!(sample.board == before);
    Ok(())
}

#[rstest]
fn cancelled_column_drag_returns_column_to_its_slot(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Column(sample.todo))
        .ok_or_eyre("drag should start")?;
    ensure!(sample.board.move_column(sample.todo, 2).is_applied());

    let outcome = session.cancel(&mut sample.board);

    ensure!(outcome == DragOutcome::Reverted);
    ensure!(sample.board.column_ids() == vec![sample.todo, sample.doing, sample.done]);
    Ok(())
}

#[rstest]
fn column_drag_moves_column_on_drop(mut sample: SampleBoard) -> eyre::Result<()> {
    let session = DragSession::start(&sample.board, DragHandle::Column(sample.done))
        .ok_or_eyre("drag should start")?;

    let hover = session.over(&mut sample.board, DropTarget::Column(sample.todo));
    let outcome = session.end(&mut sample.board, Some(DropTarget::Task(sample.task_a)));

    ensure!(hover == DragOutcome::Unchanged);
    ensure!(outcome == DragOutcome::Applied);
    ensure!(sample.board.column_ids() == vec![sample.done, sample.todo, sample.doing]);
    Ok(())
}
