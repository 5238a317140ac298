//! Shared world state for kanban board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use blitztask::board::{
    adapters::memory::InMemoryBoardBackend,
    domain::{Board, ColumnId, TaskId},
    services::BoardService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryBoardBackend, DefaultClock>;

/// Scenario world for board behaviour tests.
///
/// Steps refer to columns and tasks by short names; the world maps those
/// names to the identifiers on the board.
pub struct KanbanWorld {
    pub backend: Arc<InMemoryBoardBackend>,
    pub service: TestBoardService,
    pub columns: HashMap<String, ColumnId>,
    pub tasks: HashMap<String, TaskId>,
    pub initial_board: Option<Board>,
}

impl KanbanWorld {
    /// Creates a world backed by an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    /// Creates a world whose backend serves `board`. The service still has
    /// to be loaded.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        let backend = Arc::new(InMemoryBoardBackend::with_board(board));
        let service = BoardService::new(Arc::clone(&backend), Arc::new(DefaultClock));
        Self {
            backend,
            service,
            columns: HashMap::new(),
            tasks: HashMap::new(),
            initial_board: None,
        }
    }

    /// Resolves a column name used in a step.
    pub fn column_id(&self, name: &str) -> Result<ColumnId, eyre::Report> {
        self.columns
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown column {name:?} in scenario"))
    }

    /// Resolves a task name used in a step.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task {name:?} in scenario"))
    }

    /// Returns the task names in a column, top to bottom.
    pub fn task_names_in(&self, column: &str) -> Result<Vec<String>, eyre::Report> {
        let column_id = self.column_id(column)?;
        let board = self.service.snapshot()?;
        let ids = board
            .column(column_id)
            .ok_or_else(|| eyre::eyre!("column {column:?} is not on the board"))?
            .task_ids();
        ids.into_iter()
            .map(|id| {
                self.tasks
                    .iter()
                    .find_map(|(name, known)| (*known == id).then(|| name.clone()))
                    .ok_or_else(|| eyre::eyre!("task {id} has no scenario name"))
            })
            .collect()
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Splits a comma-separated list of names from a step.
pub fn names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
