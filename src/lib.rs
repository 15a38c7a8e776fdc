//! Flowtask: task view aggregation for the Flow collaboration platform.
//!
//! This crate locates a task by its user-facing number, loads the task's
//! primary post, backfills older remarks, expands nested replies, and
//! normalizes everything into a single [`task::domain::NormalizedTaskView`].
//!
//! # Architecture
//!
//! Flowtask follows hexagonal architecture principles:
//!
//! - **Domain**: Wire records, value types, and pure normalization helpers
//! - **Ports**: Abstract trait interfaces for the remote platform
//! - **Adapters**: Concrete implementations of ports (HTTP, scripted)
//!
//! # Modules
//!
//! - [`config`]: Credentials, client settings, and the shared session
//! - [`task`]: Task lookup, enrichment, and listing

pub mod config;
pub mod task;
