//! Task lookup and enrichment for the Flow platform.
//!
//! This module locates a task by its user-facing number, loads the task's
//! primary post, optionally backfills older remarks and expands nested
//! replies, then normalizes the result into a stable view. It also lists the
//! caller's tasks. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
