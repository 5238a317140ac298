//! In-memory backend that mimics the remote API's canonicalization.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Board, BoardDomainError, Column, ColumnId, PersistedTaskData, Task, TaskId},
    ports::{BoardBackend, BoardBackendError, BoardBackendResult},
};

/// Thread-safe in-memory board backend.
///
/// Like the real API it assigns its own identifiers to created records, so
/// callers exercise the same reconciliation path they would in production.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    board: Board,
    created_tasks: Vec<TaskId>,
    created_columns: Vec<ColumnId>,
}

impl InMemoryBoardBackend {
    /// Creates a backend holding an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that serves `board` from [`BoardBackend::load_board`].
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBackendState {
                board,
                ..InMemoryBackendState::default()
            })),
        }
    }

    /// Returns the backend's copy of the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardBackendError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn stored_board(&self) -> BoardBackendResult<Board> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.board.clone())
    }

    /// Returns the identifiers of tasks created through this backend, in
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardBackendError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn created_task_ids(&self) -> BoardBackendResult<Vec<TaskId>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.created_tasks.clone())
    }

    /// Returns the identifiers of columns created through this backend, in
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardBackendError::Unavailable`] if the state lock is
    /// poisoned.
    pub fn created_column_ids(&self) -> BoardBackendResult<Vec<ColumnId>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.created_columns.clone())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> BoardBackendError {
    BoardBackendError::unavailable(std::io::Error::other(err.to_string()))
}

fn rejected(err: BoardDomainError) -> BoardBackendError {
    match err {
        BoardDomainError::ColumnNotFound(column_id) => BoardBackendError::NotFound(column_id),
        other => BoardBackendError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl BoardBackend for InMemoryBoardBackend {
    async fn load_board(&self) -> BoardBackendResult<Board> {
        self.stored_board()
    }

    async fn create_task(&self, column_id: ColumnId, task: &Task) -> BoardBackendResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let canonical = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            details: task.details().clone(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        });
        state
            .board
            .add_task(canonical.clone(), column_id)
            .map_err(rejected)?;
        state.created_tasks.push(canonical.id());
        Ok(canonical)
    }

    async fn create_column(&self, column: &Column) -> BoardBackendResult<Column> {
        let mut state = self.state.write().map_err(poisoned)?;
        let canonical = Column::with_id(
            ColumnId::new(),
            column.title().clone(),
            column.color().clone(),
        );
        state
            .board
            .append_column(canonical.clone())
            .map_err(rejected)?;
        state.created_columns.push(canonical.id());
        Ok(canonical)
    }
}
