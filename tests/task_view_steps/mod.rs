//! Step definitions for task view aggregation scenarios.

mod given;
mod then;
mod when;
pub mod world;
