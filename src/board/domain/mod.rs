//! Domain model for the kanban board.
//!
//! Tasks live inside ordered columns, and columns live inside the [`Board`]
//! aggregate. The board's mutation methods form the reconciler: they are the
//! only way to change board structure and every one of them preserves the
//! partition invariant. Nothing here knows about rendering, gestures beyond
//! their typed identifiers, or persistence.

mod board;
mod column;
mod drag;
mod error;
mod ids;
mod task;

pub use board::{
    Board, BoardOutcome, ColumnDeletePolicy, InsertPosition, NoOpReason, TaskLocation,
};
pub use column::{Column, ColumnColor, ColumnTitle};
pub use drag::{DragHandle, DragOrigin, DragOutcome, DragSession, DropLocation, DropTarget};
pub use error::{
    BoardDomainError, ParseColumnDeletePolicyError, ParseInsertPositionError,
    ParseTaskPriorityError,
};
pub use ids::{ColumnId, TaskId};
pub use task::{Assignee, PersistedTaskData, Task, TaskDetails, TaskPatch, TaskPriority, TaskTitle};
