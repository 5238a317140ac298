//! Backend port: the remote service that owns canonical board records.

use crate::board::domain::{Board, Column, ColumnId, Task};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend operations.
pub type BoardBackendResult<T> = Result<T, BoardBackendError>;

/// Contract for the backend API that persists the board.
///
/// Creates return the canonical record, which may carry a server-assigned
/// identifier and normalized fields. The caller replaces its optimistic
/// local entity with whatever comes back.
#[async_trait]
pub trait BoardBackend: Send + Sync {
    /// Loads the board the session starts from.
    async fn load_board(&self) -> BoardBackendResult<Board>;

    /// Creates a task in a column and returns the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardBackendError::Rejected`] when the backend refuses the
    /// record or [`BoardBackendError::NotFound`] when it does not know the
    /// column.
    async fn create_task(&self, column_id: ColumnId, task: &Task) -> BoardBackendResult<Task>;

    /// Creates a column and returns the canonical record. Tasks on the
    /// returned column are ignored.
    async fn create_column(&self, column: &Column) -> BoardBackendResult<Column>;
}

/// Errors returned by backend adapters.
#[derive(Debug, Clone, Error)]
pub enum BoardBackendError {
    /// The backend refused the record.
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// The backend does not know the referenced column.
    #[error("backend has no column {0}")]
    NotFound(ColumnId),

    /// The backend could not be reached or failed internally.
    #[error("backend unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardBackendError {
    /// Wraps a transport or server failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
