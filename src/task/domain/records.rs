//! Platform record shapes as they arrive on the wire.
//!
//! Field names follow the platform's upper-case keys through serde renames.
//! The platform is loose with scalar types: a field documented as a string
//! may arrive as `null` or as a number, so every scalar goes through
//! [`lenient_string`]. Missing arrays deserialize as empty.

use super::{OrgId, PostId, ProjectId, RemarkId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts a string, number, boolean, or `null` and yields its text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Like [`lenient_string`], but keeps absence and blank values distinct from
/// real text.
fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_string(deserializer)?;
    Ok((!text.trim().is_empty()).then_some(text))
}

/// Accepts an array or `null`.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn is_flag_set(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("Y")
}

/// One data cell of a tagged task column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCell {
    /// Cell value.
    #[serde(rename = "CUSTOM_COLUMN_DATA", default, deserialize_with = "lenient_string")]
    pub value: String,
    /// User display name, populated on user-typed columns.
    #[serde(rename = "USER_NM", default, deserialize_with = "lenient_string")]
    pub user_name: String,
}

/// A typed column on a task summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskColumn {
    /// Column-type label, for example `TASK_NUM`.
    #[serde(rename = "DEFAULT_COLUMN_TYPE", default, deserialize_with = "lenient_string")]
    pub tag: String,
    /// Data cells, first cell carries the scalar value.
    #[serde(rename = "COLUMN_DATA_REC", default, deserialize_with = "lenient_vec")]
    pub cells: Vec<ColumnCell>,
}

/// Task summary returned by the task list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummaryRecord {
    /// Owning project.
    #[serde(rename = "COLABO_SRNO", default, deserialize_with = "lenient_string")]
    pub project_id: String,
    /// Primary post of the task.
    #[serde(rename = "COLABO_COMMT_SRNO", default, deserialize_with = "lenient_string")]
    pub post_id: String,
    /// Project title.
    #[serde(rename = "COLABO_TTL", default, deserialize_with = "lenient_string")]
    pub project_name: String,
    /// Typed columns.
    #[serde(rename = "TASK_COLUMN_REC", default, deserialize_with = "lenient_vec")]
    pub columns: Vec<TaskColumn>,
}

impl TaskSummaryRecord {
    /// Returns the owning project id.
    #[must_use]
    pub fn project(&self) -> ProjectId {
        ProjectId::new(self.project_id.as_str())
    }

    /// Returns the primary post id.
    #[must_use]
    pub fn post(&self) -> PostId {
        PostId::new(self.post_id.as_str())
    }
}

/// Task list response body (envelope already checked).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// Task summaries on the requested page.
    #[serde(rename = "TASK_REC", default, deserialize_with = "lenient_vec")]
    pub tasks: Vec<TaskSummaryRecord>,
    /// `Y` when further pages exist.
    #[serde(rename = "NEXT_YN", default, deserialize_with = "lenient_string")]
    pub next_page: String,
}

impl TaskListResponse {
    /// Returns whether the platform reports further pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        is_flag_set(&self.next_page)
    }
}

/// File attached to a post, remark, or reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Original file name.
    #[serde(rename = "ORCP_FILE_NM", default, deserialize_with = "lenient_string")]
    pub file_name: String,
    /// Size in bytes, as decimal text.
    #[serde(rename = "FILE_SIZE", default, deserialize_with = "lenient_string")]
    pub file_size: String,
    /// Download URL.
    #[serde(rename = "ATCH_URL", default, deserialize_with = "lenient_string")]
    pub url: String,
    /// Thumbnail URL, when the platform rendered one.
    #[serde(rename = "THUM_IMG_PATH", default, deserialize_with = "lenient_optional_string")]
    pub thumbnail_url: Option<String>,
}

/// Assignee embedded in the task detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Worker user id.
    #[serde(rename = "WORKER_ID", default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Worker display name.
    #[serde(rename = "WORKER_NM", default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Profile image URL.
    #[serde(rename = "WORKER_PRFL_PHTG", default, deserialize_with = "lenient_string")]
    pub profile_image: String,
}

/// Task metadata nested in a post record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetailRecord {
    /// Status code.
    #[serde(rename = "STTS", default, deserialize_with = "lenient_string")]
    pub status: String,
    /// Priority code.
    #[serde(rename = "PRIORITY", default, deserialize_with = "lenient_string")]
    pub priority: String,
    /// User-facing task number.
    #[serde(rename = "TASK_NUM", default, deserialize_with = "lenient_string")]
    pub task_number: String,
    /// Task name.
    #[serde(rename = "TASK_NM", default, deserialize_with = "lenient_string")]
    pub task_name: String,
    /// Start date, fixed-width digits.
    #[serde(rename = "START_DT", default, deserialize_with = "lenient_string")]
    pub start_date: String,
    /// End date, fixed-width digits.
    #[serde(rename = "END_DT", default, deserialize_with = "lenient_string")]
    pub end_date: String,
    /// Progress percentage as decimal text.
    #[serde(rename = "PROGRESS", default, deserialize_with = "lenient_string")]
    pub progress: String,
    /// Assignees.
    #[serde(rename = "WORKER_REC", default, deserialize_with = "lenient_vec")]
    pub workers: Vec<WorkerRecord>,
}

/// Canonical remark shape, as embedded in a post record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkRecord {
    /// Owning project.
    #[serde(rename = "COLABO_SRNO", default, deserialize_with = "lenient_string")]
    pub project_id: String,
    /// Owning post.
    #[serde(rename = "COLABO_COMMT_SRNO", default, deserialize_with = "lenient_string")]
    pub post_id: String,
    /// Remark id.
    #[serde(rename = "COLABO_REMARK_SRNO", default, deserialize_with = "lenient_string")]
    pub remark_id: String,
    /// Author user id.
    #[serde(rename = "RGSR_ID", default, deserialize_with = "lenient_string")]
    pub author_id: String,
    /// Author display name.
    #[serde(rename = "RGSR_NM", default, deserialize_with = "lenient_string")]
    pub author_name: String,
    /// Author job title; never sent by the backfill endpoint.
    #[serde(rename = "RGSR_JBCL_NM", default, deserialize_with = "lenient_optional_string")]
    pub author_job_title: Option<String>,
    /// Author org id, when the platform reports it.
    #[serde(rename = "RGSR_USE_INTT_ID", default, deserialize_with = "lenient_optional_string")]
    pub author_org_id: Option<String>,
    /// Remark text.
    #[serde(rename = "REMARK_CNTN", default, deserialize_with = "lenient_string")]
    pub content: String,
    /// Structured remark content.
    #[serde(rename = "CNTN", default, deserialize_with = "lenient_string")]
    pub rich_content: String,
    /// Creation timestamp.
    #[serde(rename = "RGSN_DTTM", default, deserialize_with = "lenient_string")]
    pub created_at: String,
    /// Last edit timestamp.
    #[serde(rename = "EDTR_DTTM", default, deserialize_with = "lenient_string")]
    pub edited_at: String,
    /// Delete flag, `Y` or `N`.
    #[serde(rename = "DELETE_YN", default, deserialize_with = "lenient_string")]
    pub delete_flag: String,
    /// System-generated remark flag.
    #[serde(rename = "SYSTEM_REMARK_YN", default, deserialize_with = "lenient_string")]
    pub system_flag: String,
    /// System code for system remarks.
    #[serde(rename = "SYS_CODE", default, deserialize_with = "lenient_string")]
    pub system_code: String,
    /// Edited flag.
    #[serde(rename = "MODIFY_YN", default, deserialize_with = "lenient_string")]
    pub modified_flag: String,
    /// Pinned flag.
    #[serde(rename = "PIN_YN", default, deserialize_with = "lenient_string")]
    pub pinned_flag: String,
    /// Nested reply count as decimal text.
    #[serde(rename = "REPLY_CNT", default, deserialize_with = "lenient_string")]
    pub reply_count: String,
    /// Image attachments.
    #[serde(rename = "REMARK_IMG_ATCH_REC", default, deserialize_with = "lenient_vec")]
    pub image_attachments: Vec<AttachmentRecord>,
    /// Non-image attachments.
    #[serde(rename = "REMARK_ATCH_REC", default, deserialize_with = "lenient_vec")]
    pub file_attachments: Vec<AttachmentRecord>,
}

impl RemarkRecord {
    /// Returns the remark id.
    #[must_use]
    pub fn id(&self) -> RemarkId {
        RemarkId::new(self.remark_id.as_str())
    }

    /// Returns the nested reply count, zero when unparseable.
    #[must_use]
    pub fn reply_count(&self) -> u32 {
        parse_count(&self.reply_count)
    }

    /// Returns whether the delete flag is set.
    #[must_use]
    pub fn is_delete_flagged(&self) -> bool {
        is_flag_set(&self.delete_flag)
    }

    /// Returns whether the remark was generated by the platform.
    #[must_use]
    pub fn is_system_remark(&self) -> bool {
        is_flag_set(&self.system_flag)
    }

    /// Org id to use for reply lookups, falling back to the caller's.
    #[must_use]
    pub fn reply_org_id(&self, caller_org: &OrgId) -> OrgId {
        self.author_org_id
            .as_deref()
            .map_or_else(|| caller_org.clone(), OrgId::new)
    }
}

/// Remark shape returned by the backfill endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousRemarkRecord {
    /// Owning project.
    #[serde(rename = "COLABO_SRNO", default, deserialize_with = "lenient_string")]
    pub project_id: String,
    /// Owning post.
    #[serde(rename = "COLABO_COMMT_SRNO", default, deserialize_with = "lenient_string")]
    pub post_id: String,
    /// Remark id.
    #[serde(rename = "COLABO_REMARK_SRNO", default, deserialize_with = "lenient_string")]
    pub remark_id: String,
    /// Author user id.
    #[serde(rename = "RGSR_ID", default, deserialize_with = "lenient_string")]
    pub author_id: String,
    /// Author display name.
    #[serde(rename = "RGSR_NM", default, deserialize_with = "lenient_string")]
    pub author_name: String,
    /// Remark text.
    #[serde(rename = "REMARK_CNTN", default, deserialize_with = "lenient_string")]
    pub content: String,
    /// Structured remark content.
    #[serde(rename = "CNTN", default, deserialize_with = "lenient_string")]
    pub rich_content: String,
    /// Creation timestamp.
    #[serde(rename = "RGSN_DTTM", default, deserialize_with = "lenient_string")]
    pub created_at: String,
    /// Last edit timestamp.
    #[serde(rename = "EDTR_DTTM", default, deserialize_with = "lenient_string")]
    pub edited_at: String,
    /// Delete flag.
    #[serde(rename = "DELETE_YN", default, deserialize_with = "lenient_string")]
    pub delete_flag: String,
    /// System-generated remark flag.
    #[serde(rename = "SYSTEM_REMARK_YN", default, deserialize_with = "lenient_string")]
    pub system_flag: String,
    /// Edited flag.
    #[serde(rename = "MODIFY_YN", default, deserialize_with = "lenient_string")]
    pub modified_flag: String,
    /// Pinned flag.
    #[serde(rename = "PIN_YN", default, deserialize_with = "lenient_string")]
    pub pinned_flag: String,
    /// Nested reply count.
    #[serde(rename = "REPLY_CNT", default, deserialize_with = "lenient_string")]
    pub reply_count: String,
    /// Image attachments, named `IMG_ATCH_REC` on this endpoint.
    #[serde(rename = "IMG_ATCH_REC", default, deserialize_with = "lenient_vec")]
    pub image_attachments: Vec<AttachmentRecord>,
    /// Non-image attachments, named `ATCH_REC` on this endpoint.
    #[serde(rename = "ATCH_REC", default, deserialize_with = "lenient_vec")]
    pub file_attachments: Vec<AttachmentRecord>,
}

impl From<PreviousRemarkRecord> for RemarkRecord {
    fn from(previous: PreviousRemarkRecord) -> Self {
        Self {
            project_id: previous.project_id,
            post_id: previous.post_id,
            remark_id: previous.remark_id,
            author_id: previous.author_id,
            author_name: previous.author_name,
            author_job_title: None,
            author_org_id: None,
            content: previous.content,
            rich_content: previous.rich_content,
            created_at: previous.created_at,
            edited_at: previous.edited_at,
            delete_flag: previous.delete_flag,
            system_flag: previous.system_flag,
            system_code: String::new(),
            modified_flag: previous.modified_flag,
            pinned_flag: previous.pinned_flag,
            reply_count: previous.reply_count,
            image_attachments: previous.image_attachments,
            file_attachments: previous.file_attachments,
        }
    }
}

/// Backfill response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousRemarksResponse {
    /// Older remarks, oldest first.
    #[serde(rename = "COLABO_REMARK_REC", default, deserialize_with = "lenient_vec")]
    pub remarks: Vec<PreviousRemarkRecord>,
}

/// Nested reply under a remark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRecord {
    /// Author display name.
    #[serde(rename = "RGSR_NM", default, deserialize_with = "lenient_string")]
    pub author_name: String,
    /// Reply text.
    #[serde(rename = "CNTN", default, deserialize_with = "lenient_string")]
    pub content: String,
    /// Creation timestamp.
    #[serde(rename = "RGSN_DTTM", default, deserialize_with = "lenient_string")]
    pub created_at: String,
    /// Image attachments.
    #[serde(rename = "IMG_ATCH_REC", default, deserialize_with = "lenient_vec")]
    pub attachments: Vec<AttachmentRecord>,
}

/// Reply list response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyListResponse {
    /// Replies in platform order.
    #[serde(rename = "REPLY_REC", default, deserialize_with = "lenient_vec")]
    pub replies: Vec<ReplyRecord>,
}

/// The task's primary post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Owning project.
    #[serde(rename = "COLABO_SRNO", default, deserialize_with = "lenient_string")]
    pub project_id: String,
    /// Post id.
    #[serde(rename = "COLABO_COMMT_SRNO", default, deserialize_with = "lenient_string")]
    pub post_id: String,
    /// Project title.
    #[serde(rename = "COLABO_TTL", default, deserialize_with = "lenient_string")]
    pub project_name: String,
    /// Post title.
    #[serde(rename = "COMMT_TTL", default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Body, possibly a structured component document.
    #[serde(rename = "CNTN", default, deserialize_with = "lenient_string")]
    pub content: String,
    /// Plain-text rendering of the body.
    #[serde(rename = "OUT_CNTN", default, deserialize_with = "lenient_string")]
    pub plain_content: String,
    /// Author user id.
    #[serde(rename = "RGSR_ID", default, deserialize_with = "lenient_string")]
    pub author_id: String,
    /// Author display name.
    #[serde(rename = "RGSR_NM", default, deserialize_with = "lenient_string")]
    pub author_name: String,
    /// Author department.
    #[serde(rename = "RGSR_DVSN_NM", default, deserialize_with = "lenient_string")]
    pub author_department: String,
    /// Author job title.
    #[serde(rename = "RGSR_JBCL_NM", default, deserialize_with = "lenient_string")]
    pub author_position: String,
    /// Creation timestamp.
    #[serde(rename = "COMMT_RGSN_DTTM", default, deserialize_with = "lenient_string")]
    pub created_at: String,
    /// Server-reported total remark count as decimal text.
    #[serde(rename = "REMARK_CNT", default, deserialize_with = "lenient_string")]
    pub remark_count: String,
    /// Embedded remark page, oldest first.
    #[serde(rename = "REMARK_REC", default, deserialize_with = "lenient_vec")]
    pub remarks: Vec<RemarkRecord>,
    /// Body attachments.
    #[serde(rename = "IMG_ATCH_REC", default, deserialize_with = "lenient_vec")]
    pub attachments: Vec<AttachmentRecord>,
    /// Nested task metadata; the first entry describes this task.
    #[serde(rename = "TASK_REC", default, deserialize_with = "lenient_vec")]
    pub task: Vec<TaskDetailRecord>,
    /// Deep link into the platform.
    #[serde(rename = "CONNECT_URL", default, deserialize_with = "lenient_string")]
    pub connect_url: String,
}

impl PostRecord {
    /// Returns the owning project id.
    #[must_use]
    pub fn project(&self) -> ProjectId {
        ProjectId::new(self.project_id.as_str())
    }

    /// Returns the post id.
    #[must_use]
    pub fn post(&self) -> PostId {
        PostId::new(self.post_id.as_str())
    }

    /// Returns the server-reported total remark count.
    #[must_use]
    pub fn total_remark_count(&self) -> u32 {
        parse_count(&self.remark_count)
    }

    /// Returns the nested task metadata, when present.
    #[must_use]
    pub fn task_detail(&self) -> Option<&TaskDetailRecord> {
        self.task.first()
    }
}

/// Post detail response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailResponse {
    /// Matching posts; the first one is the task's post.
    #[serde(rename = "COMMT_REC", default, deserialize_with = "lenient_vec")]
    pub posts: Vec<PostRecord>,
}
