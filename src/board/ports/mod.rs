//! Port contracts for the kanban board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod backend;

pub use backend::{BoardBackend, BoardBackendError, BoardBackendResult};
