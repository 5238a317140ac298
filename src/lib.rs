//! BlitzTask: kanban board state management.
//!
//! This crate provides the framework-agnostic core behind the BlitzTask
//! boards: tasks grouped into ordered columns, the reconciling mutations
//! triggered by user actions and drag gestures, and the service that keeps a
//! single authoritative board in step with the backend API.
//!
//! # Architecture
//!
//! BlitzTask follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Board model, drag handling, and board orchestration

pub mod board;
