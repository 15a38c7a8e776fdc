//! Canonical task view handed to presentation layers.

use super::{AttachmentRecord, RemarkId, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};

/// File reference carried by the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentView {
    /// Original file name.
    pub file_name: String,
    /// Size in bytes as reported by the platform.
    pub file_size: String,
    /// Download URL.
    pub url: String,
    /// Thumbnail URL, when available.
    pub thumbnail_url: Option<String>,
}

impl From<&AttachmentRecord> for AttachmentView {
    fn from(record: &AttachmentRecord) -> Self {
        Self {
            file_name: record.file_name.clone(),
            file_size: record.file_size.clone(),
            url: record.url.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
        }
    }
}

/// Task assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerView {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Profile image URL.
    pub profile_image: String,
}

/// Author of the task's primary post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Department name.
    pub department: String,
    /// Job title.
    pub position: String,
}

/// Nested reply under a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyView {
    /// Author display name.
    pub author: String,
    /// Reply text.
    pub content: String,
    /// Formatted creation time.
    pub created_at: String,
    /// Attached files.
    pub attachments: Vec<AttachmentView>,
}

/// One remark of the thread, with its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    /// Platform remark id.
    pub remark_id: RemarkId,
    /// Author display name.
    pub author: String,
    /// Remark text.
    pub content: String,
    /// Formatted creation time.
    pub created_at: String,
    /// Whether the platform generated this remark.
    pub is_system_remark: bool,
    /// Raw delete flag, exposed rather than interpreted.
    pub is_delete_flagged: bool,
    /// Reply count reported by the platform.
    pub reply_count: u32,
    /// Attached files, images first.
    pub attachments: Vec<AttachmentView>,
    /// Fetched replies; empty when none were fetched.
    pub replies: Vec<ReplyView>,
}

/// Fully assembled task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTaskView {
    /// User-facing task number.
    pub task_number: String,
    /// Task name.
    pub task_name: String,
    /// Raw status code.
    pub status_code: String,
    /// Translated status.
    pub status: TaskStatus,
    /// Status display label.
    pub status_label: String,
    /// Translated priority.
    pub priority: TaskPriority,
    /// Priority display label.
    pub priority_label: String,
    /// Progress as a percentage string.
    pub progress: String,
    /// Formatted start date.
    pub start_date: String,
    /// Formatted end date.
    pub end_date: String,
    /// Assignees.
    pub workers: Vec<WorkerView>,
    /// Post author.
    pub author: AuthorView,
    /// Project title.
    pub project_name: String,
    /// Project id.
    pub project_id: String,
    /// Readable body text.
    pub content: String,
    /// Formatted creation time.
    pub created_at: String,
    /// Formatted last edit time.
    pub updated_at: String,
    /// Body attachments.
    pub attachments: Vec<AttachmentView>,
    /// Remark thread, oldest first.
    pub comments: Vec<CommentView>,
    /// Deep link into the platform.
    pub connect_url: String,
}

/// Where an attachment sits within a task view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentOrigin {
    /// The task's primary post.
    Body,
    /// A comment, by zero-based position.
    Comment {
        /// Comment position.
        comment: usize,
    },
    /// A reply, by zero-based comment and reply position.
    Reply {
        /// Comment position.
        comment: usize,
        /// Reply position within the comment.
        reply: usize,
    },
}

/// Attachment together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRef<'a> {
    /// Origin within the view.
    pub origin: AttachmentOrigin,
    /// The attachment.
    pub attachment: &'a AttachmentView,
}

impl NormalizedTaskView {
    /// Lists every attachment: body first, then each comment followed by its
    /// replies.
    #[must_use]
    pub fn attachment_refs(&self) -> Vec<AttachmentRef<'_>> {
        let body = self.attachments.iter().map(|attachment| AttachmentRef {
            origin: AttachmentOrigin::Body,
            attachment,
        });
        let thread = self
            .comments
            .iter()
            .enumerate()
            .flat_map(|(comment_index, comment)| {
                let own = comment.attachments.iter().map(move |attachment| AttachmentRef {
                    origin: AttachmentOrigin::Comment {
                        comment: comment_index,
                    },
                    attachment,
                });
                let nested = comment
                    .replies
                    .iter()
                    .enumerate()
                    .flat_map(move |(reply_index, reply)| {
                        reply.attachments.iter().map(move |attachment| AttachmentRef {
                            origin: AttachmentOrigin::Reply {
                                comment: comment_index,
                                reply: reply_index,
                            },
                            attachment,
                        })
                    });
                own.chain(nested)
            });
        body.chain(thread).collect()
    }
}
