//! Board aggregate root and the reconciling mutations applied to it.
//!
//! Every mutation either applies completely or leaves the board as it was.
//! Stale references are reported as [`BoardOutcome::Unchanged`]; only
//! failures the user must see are returned as [`BoardDomainError`].

use super::{
    BoardDomainError, Column, ColumnId, ColumnTitle, ParseColumnDeletePolicyError,
    ParseInsertPositionError, Task, TaskId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Where a new column goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPosition {
    /// Immediately left of the anchor column.
    Before,
    /// Immediately right of the anchor column.
    After,
}

impl InsertPosition {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl TryFrom<&str> for InsertPosition {
    type Error = ParseInsertPositionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(ParseInsertPositionError(value.to_owned())),
        }
    }
}

/// What happens to a column's tasks when the column is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDeletePolicy {
    /// Delete the column together with every task it holds.
    #[default]
    Cascade,
    /// Refuse to delete a column that still holds tasks.
    RejectNonEmpty,
    /// Append the tasks to the previous column, or the next one when the
    /// deleted column is first.
    MigrateToNeighbour,
}

impl ColumnDeletePolicy {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::RejectNonEmpty => "reject_non_empty",
            Self::MigrateToNeighbour => "migrate_to_neighbour",
        }
    }
}

impl TryFrom<&str> for ColumnDeletePolicy {
    type Error = ParseColumnDeletePolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "cascade" => Ok(Self::Cascade),
            "reject_non_empty" => Ok(Self::RejectNonEmpty),
            "migrate_to_neighbour" => Ok(Self::MigrateToNeighbour),
            _ => Err(ParseColumnDeletePolicyError(value.to_owned())),
        }
    }
}

/// Position of a task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskLocation {
    /// Column holding the task.
    pub column_id: ColumnId,
    /// Zero-based index within the column.
    pub index: usize,
}

/// Why a mutation left the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The task is not on the board.
    TaskNotFound(TaskId),
    /// The task is not in the column the caller named.
    TaskNotInColumn {
        /// Task the caller referenced.
        task_id: TaskId,
        /// Column the caller expected it in.
        column_id: ColumnId,
    },
    /// The column is not on the board.
    ColumnNotFound(ColumnId),
    /// The entity is already where the caller asked it to be.
    AlreadyInPlace,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskNotFound(task_id) => write!(f, "task {task_id} not found"),
            Self::TaskNotInColumn { task_id, column_id } => {
                write!(f, "task {task_id} is not in column {column_id}")
            }
            Self::ColumnNotFound(column_id) => write!(f, "column {column_id} not found"),
            Self::AlreadyInPlace => write!(f, "already in place"),
        }
    }
}

/// Result of a mutation that never fails loudly.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOutcome {
    /// The board changed.
    Applied,
    /// The board was left as it was.
    Unchanged(NoOpReason),
}

impl BoardOutcome {
    /// Returns `true` when the board changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The full kanban state: ordered columns, each with an ordered task list.
///
/// Every task appears in exactly one column, exactly once. Construction and
/// deserialization verify this; every mutation preserves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct BoardSnapshot {
    #[serde(default)]
    columns: Vec<Column>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardDomainError;

    fn try_from(value: BoardSnapshot) -> Result<Self, Self::Error> {
        Self::from_columns(value.columns)
    }
}

impl Board {
    /// Creates a board with no columns.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Creates a board from ordered columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`] or
    /// [`BoardDomainError::DuplicateTask`] when the columns break the
    /// partition invariant.
    pub fn from_columns(
        columns: impl IntoIterator<Item = Column>,
    ) -> Result<Self, BoardDomainError> {
        let board = Self {
            columns: columns.into_iter().collect(),
        };
        board.verify_partition()?;
        Ok(board)
    }

    /// Returns the ordered columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the ordered column identifiers.
    #[must_use]
    pub fn column_ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(Column::id).collect()
    }

    /// Finds a column by identifier.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == column_id)
    }

    /// Returns the index of a column.
    #[must_use]
    pub fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| column.id() == column_id)
    }

    /// Finds the column and index holding a task.
    #[must_use]
    pub fn locate_task(&self, task_id: TaskId) -> Option<TaskLocation> {
        self.columns.iter().find_map(|column| {
            column.position_of(task_id).map(|index| TaskLocation {
                column_id: column.id(),
                index,
            })
        })
    }

    /// Finds a task anywhere on the board.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(Column::tasks)
            .find(|task| task.id() == task_id)
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Returns `true` when the board has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Checks the partition invariant.
    ///
    /// # Errors
    ///
    /// Returns the first duplicated column or task identifier found.
    pub fn verify_partition(&self) -> Result<(), BoardDomainError> {
        let mut column_ids = HashSet::new();
        let mut task_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(column.id()) {
                return Err(BoardDomainError::DuplicateColumn(column.id()));
            }
            for task in column.tasks() {
                if !task_ids.insert(task.id()) {
                    return Err(BoardDomainError::DuplicateTask(task.id()));
                }
            }
        }
        Ok(())
    }

    /// Moves a task from `source` into `target` at `target_index`, or to the
    /// end of `target` when no index is given.
    ///
    /// A same-column move with an index is a reorder. A same-column move
    /// without one changes nothing.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        source: ColumnId,
        target: ColumnId,
        target_index: Option<usize>,
    ) -> BoardOutcome {
        if source == target {
            return match target_index {
                Some(index) => self.reorder_task(task_id, source, index),
                None => self
                    .check_membership(task_id, source)
                    .unwrap_or(BoardOutcome::Unchanged(NoOpReason::AlreadyInPlace)),
            };
        }

        let (source_column, target_column) = self.column_pair_mut(source, target);
        let Some(source_column) = source_column else {
            return BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(source));
        };
        let Some(target_column) = target_column else {
            return BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(target));
        };
        let Some(task) = source_column.remove_task(task_id) else {
            return BoardOutcome::Unchanged(NoOpReason::TaskNotInColumn {
                task_id,
                column_id: source,
            });
        };

        match target_index {
            Some(index) => target_column.insert_task(index, task),
            None => target_column.push_task(task),
        };
        BoardOutcome::Applied
    }

    /// Moves a task to `new_index` within its column. Indices past the end
    /// land on the last slot.
    pub fn reorder_task(
        &mut self,
        task_id: TaskId,
        column_id: ColumnId,
        new_index: usize,
    ) -> BoardOutcome {
        let Some(column) = self.column_mut(column_id) else {
            return BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(column_id));
        };
        let Some(current) = column.position_of(task_id) else {
            return BoardOutcome::Unchanged(NoOpReason::TaskNotInColumn { task_id, column_id });
        };
        let slot = new_index.min(column.len().saturating_sub(1));
        if slot == current {
            return BoardOutcome::Unchanged(NoOpReason::AlreadyInPlace);
        }
        if let Some(task) = column.remove_task(task_id) {
            column.insert_task(slot, task);
        }
        BoardOutcome::Applied
    }

    /// Appends a task to a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTask`] if the task is already on
    /// the board or [`BoardDomainError::ColumnNotFound`] if the column does
    /// not exist.
    pub fn add_task(
        &mut self,
        task: Task,
        column_id: ColumnId,
    ) -> Result<TaskLocation, BoardDomainError> {
        if self.locate_task(task.id()).is_some() {
            return Err(BoardDomainError::DuplicateTask(task.id()));
        }
        let column = self
            .column_mut(column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))?;
        let index = column.push_task(task);
        Ok(TaskLocation { column_id, index })
    }

    /// Removes a task from whichever column holds it.
    pub fn delete_task(&mut self, task_id: TaskId) -> BoardOutcome {
        let removed = self
            .columns
            .iter_mut()
            .find_map(|column| column.remove_task(task_id));
        match removed {
            Some(_) => BoardOutcome::Applied,
            None => BoardOutcome::Unchanged(NoOpReason::TaskNotFound(task_id)),
        }
    }

    /// Replaces the task carrying `updated.id()` in place, keeping its column
    /// and index.
    pub fn edit_task(&mut self, updated: Task) -> BoardOutcome {
        let task_id = updated.id();
        match self.task_mut(task_id) {
            Some(slot) => {
                *slot = updated;
                BoardOutcome::Applied
            }
            None => BoardOutcome::Unchanged(NoOpReason::TaskNotFound(task_id)),
        }
    }

    /// Swaps a locally created task for its canonical record, keeping the
    /// position. The canonical record may carry a different identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTask`] if the canonical identifier
    /// already belongs to another task on the board.
    pub fn replace_task(
        &mut self,
        local_id: TaskId,
        canonical: Task,
    ) -> Result<BoardOutcome, BoardDomainError> {
        if canonical.id() != local_id && self.locate_task(canonical.id()).is_some() {
            return Err(BoardDomainError::DuplicateTask(canonical.id()));
        }
        Ok(match self.task_mut(local_id) {
            Some(slot) => {
                *slot = canonical;
                BoardOutcome::Applied
            }
            None => BoardOutcome::Unchanged(NoOpReason::TaskNotFound(local_id)),
        })
    }

    /// Inserts a column next to `anchor`. Returns the new column's index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for a missing anchor,
    /// [`BoardDomainError::DuplicateColumn`] for a reused column identifier,
    /// or [`BoardDomainError::DuplicateTask`] if the column carries tasks
    /// already on the board.
    pub fn add_column(
        &mut self,
        column: Column,
        position: InsertPosition,
        anchor: ColumnId,
    ) -> Result<usize, BoardDomainError> {
        self.ensure_insertable(&column)?;
        let anchor_index = self
            .column_index(anchor)
            .ok_or(BoardDomainError::ColumnNotFound(anchor))?;
        let index = match position {
            InsertPosition::Before => anchor_index,
            InsertPosition::After => anchor_index.saturating_add(1),
        };
        self.columns.insert(index, column);
        Ok(index)
    }

    /// Appends a column after every existing column. Returns its index.
    ///
    /// # Errors
    ///
    /// Same as [`Board::add_column`], minus the anchor check.
    pub fn append_column(&mut self, column: Column) -> Result<usize, BoardDomainError> {
        self.ensure_insertable(&column)?;
        self.columns.push(column);
        Ok(self.columns.len().saturating_sub(1))
    }

    /// Replaces a column title.
    pub fn rename_column(&mut self, column_id: ColumnId, title: ColumnTitle) -> BoardOutcome {
        match self.column_mut(column_id) {
            Some(column) => {
                column.set_title(title);
                BoardOutcome::Applied
            }
            None => BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(column_id)),
        }
    }

    /// Moves a column to `new_index`. Indices past the end land on the last
    /// slot.
    pub fn move_column(&mut self, column_id: ColumnId, new_index: usize) -> BoardOutcome {
        let Some(current) = self.column_index(column_id) else {
            return BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(column_id));
        };
        let slot = new_index.min(self.columns.len().saturating_sub(1));
        if slot == current {
            return BoardOutcome::Unchanged(NoOpReason::AlreadyInPlace);
        }
        let column = self.columns.remove(current);
        self.columns.insert(slot, column);
        BoardOutcome::Applied
    }

    /// Adopts the canonical identity (id, title, color) of a locally created
    /// column while keeping its position and current tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`] if the canonical
    /// identifier already belongs to another column.
    pub fn replace_column_identity(
        &mut self,
        local_id: ColumnId,
        canonical: Column,
    ) -> Result<BoardOutcome, BoardDomainError> {
        if canonical.id() != local_id && self.column(canonical.id()).is_some() {
            return Err(BoardDomainError::DuplicateColumn(canonical.id()));
        }
        Ok(match self.column_mut(local_id) {
            Some(column) => {
                column.adopt_identity(canonical);
                BoardOutcome::Applied
            }
            None => BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(local_id)),
        })
    }

    /// Deletes a column, handling its tasks according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotEmpty`] under
    /// [`ColumnDeletePolicy::RejectNonEmpty`], or
    /// [`BoardDomainError::NoNeighbourColumn`] under
    /// [`ColumnDeletePolicy::MigrateToNeighbour`] when the non-empty column is
    /// the only one.
    pub fn delete_column(
        &mut self,
        column_id: ColumnId,
        policy: ColumnDeletePolicy,
    ) -> Result<BoardOutcome, BoardDomainError> {
        let Some(index) = self.column_index(column_id) else {
            return Ok(BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(column_id)));
        };
        let task_count = self.columns.get(index).map_or(0, Column::len);

        match policy {
            ColumnDeletePolicy::Cascade => {}
            ColumnDeletePolicy::RejectNonEmpty if task_count > 0 => {
                return Err(BoardDomainError::ColumnNotEmpty {
                    column_id,
                    task_count,
                });
            }
            ColumnDeletePolicy::RejectNonEmpty => {}
            ColumnDeletePolicy::MigrateToNeighbour if task_count > 0 => {
                return self.migrate_and_remove(index, column_id);
            }
            ColumnDeletePolicy::MigrateToNeighbour => {}
        }

        self.columns.remove(index);
        Ok(BoardOutcome::Applied)
    }

    fn migrate_and_remove(
        &mut self,
        index: usize,
        column_id: ColumnId,
    ) -> Result<BoardOutcome, BoardDomainError> {
        if self.columns.len() < 2 {
            return Err(BoardDomainError::NoNeighbourColumn(column_id));
        }
        let mut removed = self.columns.remove(index);
        // After removal the previous column sits at `index - 1`; the next one
        // slides into `index`, which is 0 when the deleted column was first.
        let neighbour = index.saturating_sub(1);
        if let Some(column) = self.columns.get_mut(neighbour) {
            for task in removed.take_tasks() {
                column.push_task(task);
            }
        }
        Ok(BoardOutcome::Applied)
    }

    fn check_membership(&self, task_id: TaskId, column_id: ColumnId) -> Option<BoardOutcome> {
        match self.column(column_id) {
            None => Some(BoardOutcome::Unchanged(NoOpReason::ColumnNotFound(column_id))),
            Some(column) if !column.contains(task_id) => {
                Some(BoardOutcome::Unchanged(NoOpReason::TaskNotInColumn { task_id, column_id }))
            }
            Some(_) => None,
        }
    }

    fn ensure_insertable(&self, column: &Column) -> Result<(), BoardDomainError> {
        if self.column(column.id()).is_some() {
            return Err(BoardDomainError::DuplicateColumn(column.id()));
        }
        let mut incoming = HashSet::new();
        for task in column.tasks() {
            if !incoming.insert(task.id()) || self.locate_task(task.id()).is_some() {
                return Err(BoardDomainError::DuplicateTask(task.id()));
            }
        }
        Ok(())
    }

    fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id() == column_id)
    }

    fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .find_map(|column| column.task_mut(task_id))
    }

    fn column_pair_mut(
        &mut self,
        first: ColumnId,
        second: ColumnId,
    ) -> (Option<&mut Column>, Option<&mut Column>) {
        let mut first_column = None;
        let mut second_column = None;
        for column in &mut self.columns {
            if column.id() == first {
                first_column = Some(column);
            } else if column.id() == second {
                second_column = Some(column);
            }
        }
        (first_column, second_column)
    }
}
