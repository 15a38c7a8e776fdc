//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task number is empty after trimming.
    #[error("task number must not be empty")]
    EmptyTaskNumber,
}
