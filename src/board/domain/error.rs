//! Error types for board validation, structure, and parsing.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Errors returned when a board mutation or value construction is rejected.
///
/// Stale references that are safe to ignore (moving a task that has already
/// been deleted, renaming a column that is gone) are not errors; they are
/// reported through [`super::BoardOutcome::Unchanged`] instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// An assignee was supplied without a name.
    #[error("assignee name must not be empty")]
    EmptyAssigneeName,

    /// A title exceeds the configured length limit.
    #[error("title is {actual} characters long, limit is {max}")]
    TitleTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// A task description exceeds the configured length limit.
    #[error("description is {actual} characters long, limit is {max}")]
    DescriptionTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// A task carries more labels than the configured limit.
    #[error("task has {actual} labels, limit is {max}")]
    TooManyLabels {
        /// Configured maximum number of labels.
        max: usize,
        /// Actual number of labels.
        actual: usize,
    },

    /// The referenced column does not exist on the board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// A task with the same identifier is already on the board.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A column with the same identifier is already on the board.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// The deletion policy refuses to delete a column that still holds tasks.
    #[error("column {column_id} still holds {task_count} task(s)")]
    ColumnNotEmpty {
        /// Column that was targeted for deletion.
        column_id: ColumnId,
        /// Number of tasks the column holds.
        task_count: usize,
    },

    /// Tasks cannot be migrated because the column has no neighbour.
    #[error("column {0} has no neighbouring column to receive its tasks")]
    NoNeighbourColumn(ColumnId),
}

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing a column insert position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown insert position '{0}', expected before or after")]
pub struct ParseInsertPositionError(pub String);

/// Error returned while parsing a column deletion policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column delete policy: {0}")]
pub struct ParseColumnDeletePolicyError(pub String);
