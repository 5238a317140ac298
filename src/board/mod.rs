//! Kanban board management for BlitzTask.
//!
//! Tasks are embedded in ordered columns and every task belongs to exactly
//! one column. The module follows hexagonal architecture:
//!
//! - Domain types and the reconciler in [`domain`]
//! - Behaviour settings in [`config`] and field rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
