//! Application services for board orchestration.

mod board;

pub use board::{
    AddColumnRequest, AddTaskRequest, BoardService, BoardServiceError, BoardServiceResult,
};
