//! Drag gesture handling: typed drag identifiers, drop-target resolution,
//! and the session that carries a gesture from start to end.
//!
//! The gesture adapter tags every draggable and droppable element with an
//! explicit kind, so resolution never has to infer meaning from the shape of
//! an identifier.

use super::{Board, BoardOutcome, ColumnId, NoOpReason, TaskId, TaskLocation};
use std::fmt;
use tracing::debug;

/// The element being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    /// A task card.
    Task(TaskId),
    /// A whole column.
    Column(ColumnId),
}

/// The element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// A column header; resolves to the end of that column.
    Column(ColumnId),
    /// A column's droppable task area; resolves to the end of that column.
    ColumnBody(ColumnId),
    /// A task card; resolves to that card's column and index.
    Task(TaskId),
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column_id) => write!(f, "column:{column_id}"),
            Self::ColumnBody(column_id) => write!(f, "column-body:{column_id}"),
            Self::Task(task_id) => write!(f, "task:{task_id}"),
        }
    }
}

/// Concrete insertion point a drop target resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropLocation {
    /// Column receiving the drop.
    pub column_id: ColumnId,
    /// Index within that column. Equal to the column length for
    /// end-of-column drops.
    pub index: usize,
}

/// Result of feeding a drag event to a [`DragSession`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The board changed.
    Applied,
    /// The event was valid but changed nothing.
    Unchanged,
    /// The drop target could not be resolved; the event was ignored.
    Discarded(DropTarget),
    /// The gesture was aborted and the dragged element went back to where
    /// it started.
    Reverted,
}

impl From<BoardOutcome> for DragOutcome {
    fn from(value: BoardOutcome) -> Self {
        match value {
            BoardOutcome::Applied => Self::Applied,
            BoardOutcome::Unchanged(_) => Self::Unchanged,
        }
    }
}

impl Board {
    /// Resolves a drop target to a column and index.
    ///
    /// Returns `None` when the target no longer exists on the board.
    #[must_use]
    pub fn resolve_drop_target(&self, target: DropTarget) -> Option<DropLocation> {
        match target {
            DropTarget::Column(column_id) | DropTarget::ColumnBody(column_id) => {
                self.column(column_id).map(|column| DropLocation {
                    column_id,
                    index: column.len(),
                })
            }
            DropTarget::Task(task_id) => self.locate_task(task_id).map(|location| DropLocation {
                column_id: location.column_id,
                index: location.index,
            }),
        }
    }
}

/// The dragged element and where it sat when the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// A dragged task card.
    Task {
        /// Task being dragged.
        task_id: TaskId,
        /// Column and index the task started from.
        location: TaskLocation,
    },
    /// A dragged column.
    Column {
        /// Column being dragged.
        column_id: ColumnId,
        /// Index the column started from.
        index: usize,
    },
}

/// An in-flight drag gesture.
///
/// Hover events move a dragged task across columns as the pointer crosses
/// them; the drop settles its final position. Only the dragged element's
/// starting position is kept, so an aborted gesture puts that element back
/// and leaves every other change made during the drag in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    origin: DragOrigin,
}

impl DragSession {
    /// Starts a drag. Returns `None` if the handle is not on the board.
    #[must_use]
    pub fn start(board: &Board, handle: DragHandle) -> Option<Self> {
        let origin = match handle {
            DragHandle::Task(task_id) => DragOrigin::Task {
                task_id,
                location: board.locate_task(task_id)?,
            },
            DragHandle::Column(column_id) => DragOrigin::Column {
                column_id,
                index: board.column_index(column_id)?,
            },
        };
        Some(Self { origin })
    }

    /// Returns the dragged element.
    #[must_use]
    pub const fn handle(&self) -> DragHandle {
        match self.origin {
            DragOrigin::Task { task_id, .. } => DragHandle::Task(task_id),
            DragOrigin::Column { column_id, .. } => DragHandle::Column(column_id),
        }
    }

    /// Returns where the dragged element sat when the drag started.
    #[must_use]
    pub const fn origin(&self) -> DragOrigin {
        self.origin
    }

    /// Handles the pointer moving over `target`.
    ///
    /// A dragged task follows the pointer into other columns. Hovering within
    /// its current column changes nothing; ordering is settled on drop.
    pub fn over(&self, board: &mut Board, target: DropTarget) -> DragOutcome {
        let DragOrigin::Task { task_id, .. } = self.origin else {
            return DragOutcome::Unchanged;
        };
        let Some(location) = board.resolve_drop_target(target) else {
            debug!(drop_target = %target, "discarding drag-over with unresolved target");
            return DragOutcome::Discarded(target);
        };
        let Some(current) = board.locate_task(task_id) else {
            return DragOutcome::Unchanged;
        };
        if current.column_id == location.column_id {
            return DragOutcome::Unchanged;
        }
        board
            .move_task(
                task_id,
                current.column_id,
                location.column_id,
                Some(location.index),
            )
            .into()
    }

    /// Handles the drop. A missing or unresolvable target aborts the gesture
    /// and puts the dragged element back.
    pub fn end(self, board: &mut Board, target: Option<DropTarget>) -> DragOutcome {
        let Some(drop_target) = target else {
            return self.cancel(board);
        };
        let Some(location) = board.resolve_drop_target(drop_target) else {
            debug!(drop_target = %drop_target, "reverting drag with unresolved drop target");
            return self.cancel(board);
        };

        match self.origin {
            DragOrigin::Task { task_id, .. } => settle_task(board, task_id, location),
            DragOrigin::Column { column_id, .. } => match board.column_index(location.column_id) {
                Some(index) => board.move_column(column_id, index).into(),
                None => DragOutcome::Unchanged,
            },
        }
    }

    /// Aborts the gesture and returns the dragged element to where it
    /// started.
    ///
    /// If the element or its starting column has since left the board, it
    /// stays where it is.
    pub fn cancel(self, board: &mut Board) -> DragOutcome {
        match self.origin {
            DragOrigin::Task { task_id, location } => {
                if let BoardOutcome::Unchanged(reason) = restore_task(board, task_id, location) {
                    debug!(%task_id, %reason, "dragged task left where it is");
                }
            }
            DragOrigin::Column { column_id, index } => {
                if let BoardOutcome::Unchanged(reason) = board.move_column(column_id, index) {
                    debug!(%column_id, %reason, "dragged column left where it is");
                }
            }
        }
        DragOutcome::Reverted
    }
}

fn settle_task(board: &mut Board, task_id: TaskId, location: DropLocation) -> DragOutcome {
    let Some(current) = board.locate_task(task_id) else {
        return DragOutcome::Unchanged;
    };
    if current.column_id == location.column_id {
        board
            .reorder_task(task_id, location.column_id, location.index)
            .into()
    } else {
        board
            .move_task(
                task_id,
                current.column_id,
                location.column_id,
                Some(location.index),
            )
            .into()
    }
}

fn restore_task(board: &mut Board, task_id: TaskId, origin: TaskLocation) -> BoardOutcome {
    let Some(current) = board.locate_task(task_id) else {
        return BoardOutcome::Unchanged(NoOpReason::TaskNotFound(task_id));
    };
    if current.column_id == origin.column_id {
        board.reorder_task(task_id, origin.column_id, origin.index)
    } else {
        board.move_task(
            task_id,
            current.column_id,
            origin.column_id,
            Some(origin.index),
        )
    }
}
