//! Service layer owning the authoritative board state.

use crate::board::{
    config::BoardConfig,
    domain::{
        Assignee, Board, BoardDomainError, BoardOutcome, Column, ColumnColor,
        ColumnDeletePolicy, ColumnId, DragHandle, DragOutcome, DragSession, DropTarget,
        InsertPosition, NoOpReason, Task, TaskDetails, TaskId, TaskPatch, TaskPriority,
    },
    ports::{BoardBackend, BoardBackendError},
    validation::{validate_column_title, validate_task_details},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    assignees: Vec<Assignee>,
    due_date: Option<NaiveDate>,
    labels: Vec<String>,
}

impl AddTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            assignees: Vec::new(),
            due_date: None,
            labels: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = Assignee>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Returns the target column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    fn into_details(self) -> Result<TaskDetails, BoardDomainError> {
        let mut details = TaskDetails::new(self.title)?
            .with_priority(self.priority)
            .with_assignees(self.assignees)
            .with_labels(self.labels);
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        if let Some(due_date) = self.due_date {
            details = details.with_due_date(due_date);
        }
        Ok(details)
    }
}

/// Request payload for creating a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumnRequest {
    title: String,
    color: Option<String>,
    placement: Option<(InsertPosition, ColumnId)>,
}

impl AddColumnRequest {
    /// Creates a request for a column appended after every existing column.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: None,
            placement: None,
        }
    }

    /// Sets the display accent.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Places the column before or after `anchor` instead of at the end.
    #[must_use]
    pub const fn placed(mut self, position: InsertPosition, anchor: ColumnId) -> Self {
        self.placement = Some((position, anchor));
        self
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Validation or a structural rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The backend rejected or failed the operation.
    #[error(transparent)]
    Backend(#[from] BoardBackendError),
    /// A previous operation panicked while holding the board lock.
    #[error("board state lock poisoned")]
    StatePoisoned,
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

#[derive(Debug, Default)]
struct BoardState {
    board: Board,
    drag: Option<DragSession>,
}

/// Owner of the single authoritative board.
///
/// The presentation layer reads [`BoardService::snapshot`] on each render
/// and routes every user action and drag event through this service. The
/// board lock is never held across a backend call.
#[derive(Clone)]
pub struct BoardService<B, C>
where
    B: BoardBackend,
    C: Clock + Send + Sync,
{
    backend: Arc<B>,
    clock: Arc<C>,
    config: BoardConfig,
    state: Arc<RwLock<BoardState>>,
}

impl<B, C> BoardService<B, C>
where
    B: BoardBackend,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration and an empty board.
    #[must_use]
    pub fn new(backend: Arc<B>, clock: Arc<C>) -> Self {
        Self::with_config(backend, clock, BoardConfig::default())
    }

    /// Creates a service with a custom configuration and an empty board.
    #[must_use]
    pub fn with_config(backend: Arc<B>, clock: Arc<C>, config: BoardConfig) -> Self {
        Self {
            backend,
            clock,
            config,
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Replaces the board with the backend's copy and drops any active drag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Backend`] if loading fails.
    pub async fn load(&self) -> BoardServiceResult<Board> {
        let board = self.backend.load_board().await?;
        let mut state = self.write_state()?;
        state.board = board.clone();
        state.drag = None;
        info!(
            columns = board.columns().len(),
            tasks = board.task_count(),
            "board loaded"
        );
        Ok(board)
    }

    /// Returns a copy of the current board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn snapshot(&self) -> BoardServiceResult<Board> {
        Ok(self.read_state()?.board.clone())
    }

    /// Creates a task at the end of a column.
    ///
    /// The task appears on the board immediately and is swapped for the
    /// backend's canonical record once the create call returns. If the
    /// backend fails, the optimistic task is removed again.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for invalid fields or a missing
    /// column, and [`BoardServiceError::Backend`] when the create call fails.
    pub async fn add_task(&self, request: AddTaskRequest) -> BoardServiceResult<Task> {
        let column_id = request.column_id();
        let details = request.into_details()?;
        validate_task_details(&details, &self.config)?;

        let local = Task::new(details, &*self.clock);
        let local_id = local.id();
        {
            let mut state = self.write_state()?;
            state.board.add_task(local.clone(), column_id)?;
        }

        match self.backend.create_task(column_id, &local).await {
            Ok(canonical) => {
                let mut state = self.write_state()?;
                match state.board.replace_task(local_id, canonical.clone()) {
                    Ok(BoardOutcome::Applied) => {}
                    Ok(BoardOutcome::Unchanged(reason)) => {
                        debug!(
                            task_id = %local_id,
                            %reason,
                            "optimistic task gone before reconciliation"
                        );
                    }
                    Err(err) => {
                        warn!(
                            task_id = %local_id,
                            canonical_id = %canonical.id(),
                            error = %err,
                            "canonical task clashes with the board, dropping optimistic copy"
                        );
                        discard_task(&mut state.board, local_id);
                        return Err(err.into());
                    }
                }
                Ok(canonical)
            }
            Err(err) => {
                warn!(task_id = %local_id, error = %err, "backend rejected task, rolling back");
                let mut state = self.write_state()?;
                discard_task(&mut state.board, local_id);
                Err(err.into())
            }
        }
    }

    /// Applies a partial update to a task, keeping its column and position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the patched fields are
    /// invalid; the task is left unchanged.
    pub fn edit_task(
        &self,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> BoardServiceResult<BoardOutcome> {
        let mut state = self.write_state()?;
        let Some(mut updated) = state.board.task(task_id).cloned() else {
            return Ok(log_skipped(
                "edit_task",
                BoardOutcome::Unchanged(NoOpReason::TaskNotFound(task_id)),
            ));
        };
        updated.apply_patch(patch, &*self.clock)?;
        validate_task_details(updated.details(), &self.config)?;
        Ok(log_skipped("edit_task", state.board.edit_task(updated)))
    }

    /// Moves a task between columns. See [`Board::move_task`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn move_task(
        &self,
        task_id: TaskId,
        source: ColumnId,
        target: ColumnId,
        target_index: Option<usize>,
    ) -> BoardServiceResult<BoardOutcome> {
        let mut state = self.write_state()?;
        Ok(log_skipped(
            "move_task",
            state.board.move_task(task_id, source, target, target_index),
        ))
    }

    /// Reorders a task within its column. See [`Board::reorder_task`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn reorder_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        new_index: usize,
    ) -> BoardServiceResult<BoardOutcome> {
        let mut state = self.write_state()?;
        Ok(log_skipped(
            "reorder_task",
            state.board.reorder_task(task_id, column_id, new_index),
        ))
    }

    /// Deletes a task wherever it is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn delete_task(&self, task_id: TaskId) -> BoardServiceResult<BoardOutcome> {
        let mut state = self.write_state()?;
        Ok(log_skipped("delete_task", state.board.delete_task(task_id)))
    }

    /// Creates an empty column, placed as the request asks.
    ///
    /// Like [`BoardService::add_task`], the column appears immediately and
    /// adopts the backend's canonical identity once the create call returns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for an invalid title or missing
    /// anchor, and [`BoardServiceError::Backend`] when the create call fails.
    pub async fn add_column(&self, request: AddColumnRequest) -> BoardServiceResult<Column> {
        let title = validate_column_title(&request.title, &self.config)?;
        let color = request.color.map(ColumnColor::new).unwrap_or_default();
        let local = Column::new(title, color);
        let local_id = local.id();
        {
            let mut state = self.write_state()?;
            match request.placement {
                Some((position, anchor)) => {
                    state.board.add_column(local.clone(), position, anchor)?
                }
                None => state.board.append_column(local.clone())?,
            };
        }

        match self.backend.create_column(&local).await {
            Ok(canonical) => {
                let mut state = self.write_state()?;
                match state.board.replace_column_identity(local_id, canonical.clone()) {
                    Ok(BoardOutcome::Applied) => {}
                    Ok(BoardOutcome::Unchanged(reason)) => {
                        debug!(
                            column_id = %local_id,
                            %reason,
                            "optimistic column gone before reconciliation"
                        );
                    }
                    Err(err) => {
                        warn!(
                            column_id = %local_id,
                            canonical_id = %canonical.id(),
                            error = %err,
                            "canonical column clashes with the board, dropping optimistic copy"
                        );
                        discard_column(&mut state.board, local_id);
                        return Err(err.into());
                    }
                }
                info!(column_id = %canonical.id(), title = %canonical.title(), "column added");
                Ok(state
                    .board
                    .column(canonical.id())
                    .cloned()
                    .unwrap_or(canonical))
            }
            Err(err) => {
                warn!(column_id = %local_id, error = %err, "backend rejected column, rolling back");
                let mut state = self.write_state()?;
                discard_column(&mut state.board, local_id);
                Err(err.into())
            }
        }
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for an invalid title.
    pub fn rename_column(
        &self,
        column_id: ColumnId,
        title: &str,
    ) -> BoardServiceResult<BoardOutcome> {
        let validated = validate_column_title(title, &self.config)?;
        let mut state = self.write_state()?;
        Ok(log_skipped(
            "rename_column",
            state.board.rename_column(column_id, validated),
        ))
    }

    /// Deletes a column under the configured [`ColumnDeletePolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the policy refuses the
    /// deletion.
    pub fn delete_column(&self, column_id: ColumnId) -> BoardServiceResult<BoardOutcome> {
        let policy = self.config.column_delete_policy;
        let mut state = self.write_state()?;
        let removed_tasks = state.board.column(column_id).map_or(0, Column::len);
        let outcome = state.board.delete_column(column_id, policy)?;
        if outcome.is_applied() {
            info!(%column_id, policy = policy.as_str(), removed_tasks, "column deleted");
        }
        Ok(log_skipped("delete_column", outcome))
    }

    /// Moves a column to a new index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn move_column(
        &self,
        column_id: ColumnId,
        new_index: usize,
    ) -> BoardServiceResult<BoardOutcome> {
        let mut state = self.write_state()?;
        Ok(log_skipped(
            "move_column",
            state.board.move_column(column_id, new_index),
        ))
    }

    /// Starts a drag gesture. Returns `false` when the dragged element is not
    /// on the board.
    ///
    /// A drag already in progress is abandoned where it stands.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn drag_start(&self, handle: DragHandle) -> BoardServiceResult<bool> {
        let mut state = self.write_state()?;
        if let Some(previous) = state.drag.take() {
            debug!(handle = ?previous.handle(), "replacing unfinished drag");
        }
        state.drag = DragSession::start(&state.board, handle);
        if state.drag.is_none() {
            debug!(?handle, "ignoring drag start for element not on the board");
        }
        Ok(state.drag.is_some())
    }

    /// Feeds a drag-over event to the active gesture.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn drag_over(&self, target: DropTarget) -> BoardServiceResult<DragOutcome> {
        let mut guard = self.write_state()?;
        let BoardState { board, drag } = &mut *guard;
        let Some(session) = drag.as_ref() else {
            debug!(drop_target = %target, "drag-over without an active drag");
            return Ok(DragOutcome::Unchanged);
        };
        Ok(session.over(board, target))
    }

    /// Ends the active gesture. `None` means the element was dropped outside
    /// every target, which reverts the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn drag_end(&self, target: Option<DropTarget>) -> BoardServiceResult<DragOutcome> {
        let mut guard = self.write_state()?;
        let BoardState { board, drag } = &mut *guard;
        let Some(session) = drag.take() else {
            debug!("drag-end without an active drag");
            return Ok(DragOutcome::Unchanged);
        };
        Ok(session.end(board, target))
    }

    /// Aborts the active gesture and returns the dragged element to where it
    /// started. Changes made to other elements during the drag are kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn drag_cancel(&self) -> BoardServiceResult<DragOutcome> {
        let mut guard = self.write_state()?;
        let BoardState { board, drag } = &mut *guard;
        Ok(drag
            .take()
            .map_or(DragOutcome::Unchanged, |session| session.cancel(board)))
    }

    /// Returns `true` while a drag gesture is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::StatePoisoned`] if the lock is poisoned.
    pub fn is_dragging(&self) -> BoardServiceResult<bool> {
        Ok(self.read_state()?.drag.is_some())
    }

    fn read_state(&self) -> BoardServiceResult<RwLockReadGuard<'_, BoardState>> {
        self.state.read().map_err(|_| BoardServiceError::StatePoisoned)
    }

    fn write_state(&self) -> BoardServiceResult<RwLockWriteGuard<'_, BoardState>> {
        self.state.write().map_err(|_| BoardServiceError::StatePoisoned)
    }
}

/// Removes an optimistic task that the backend never confirmed.
fn discard_task(board: &mut Board, task_id: TaskId) {
    if let BoardOutcome::Unchanged(reason) = board.delete_task(task_id) {
        debug!(%task_id, %reason, "nothing to roll back");
    }
}

/// Removes an optimistic column that the backend never confirmed.
///
/// Tasks dropped into the column while the create call was in flight move to
/// a neighbouring column. A lone column keeps its tasks and stays on the
/// board.
fn discard_column(board: &mut Board, column_id: ColumnId) {
    match board.delete_column(column_id, ColumnDeletePolicy::MigrateToNeighbour) {
        Ok(BoardOutcome::Applied) => {}
        Ok(BoardOutcome::Unchanged(reason)) => {
            debug!(%column_id, %reason, "nothing to roll back");
        }
        Err(err) => {
            warn!(%column_id, error = %err, "keeping unconfirmed column that holds tasks");
        }
    }
}

fn log_skipped(operation: &'static str, outcome: BoardOutcome) -> BoardOutcome {
    if let BoardOutcome::Unchanged(reason) = outcome {
        debug!(operation, %reason, "board mutation skipped");
    }
    outcome
}
