//! Domain model for task aggregation.
//!
//! The domain holds the platform's record shapes as they arrive on the wire,
//! the identifiers that key them, and the pure helpers that turn them into a
//! [`NormalizedTaskView`]. Nothing here performs I/O.

mod codes;
mod columns;
mod content;
mod error;
mod ids;
mod records;
mod strategy;
mod timestamp;
mod view;

pub use codes::{TaskPriority, TaskStatus};
pub use columns::{ColumnIndex, ColumnTag};
pub use content::extract_rich_text;
pub use error::TaskDomainError;
pub use ids::{OrgId, PostId, ProjectId, RemarkId, TaskNumber};
pub use records::{
    AttachmentRecord, ColumnCell, PostDetailResponse, PostRecord, PreviousRemarkRecord,
    PreviousRemarksResponse, RemarkRecord, ReplyListResponse, ReplyRecord, TaskColumn,
    TaskDetailRecord, TaskListResponse, TaskSummaryRecord, WorkerRecord,
};
pub use strategy::{DeletedRemarkPolicy, EnrichmentStrategy, PipelineOptions};
pub use timestamp::format_timestamp;
pub use view::{
    AttachmentOrigin, AttachmentRef, AttachmentView, AuthorView, CommentView,
    NormalizedTaskView, ReplyView, WorkerView,
};
