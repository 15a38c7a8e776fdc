//! Unit tests for the task aggregation context.
