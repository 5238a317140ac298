//! In-memory adapters for tests, demos, and offline use.

mod backend;
mod seed;

pub use backend::InMemoryBoardBackend;
pub use seed::demo_board;
