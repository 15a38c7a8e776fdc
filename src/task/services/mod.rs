//! Application services for task view aggregation and listing.
//!
//! The pipeline runs locator, detail fetch, and backfill in order, fans out
//! reply fetches, and hands the joined records to the normalizer.

mod api;
pub mod backfill;
pub mod detail;
mod listing;
pub mod locator;
pub mod normalize;
mod pipeline;
pub mod replies;

pub use api::{FlowApi, FlowApiError, FlowApiResult, TaskListQuery};
pub use listing::{TaskListEntry, TaskListPage, TaskListService};
pub use normalize::{AggregateSources, normalize};
pub use pipeline::{
    NotFoundReason, TaskViewError, TaskViewOutcome, TaskViewResult, TaskViewService,
};
