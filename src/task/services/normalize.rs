//! Builds the normalized view from the raw records of one pipeline run.

use crate::task::domain::{
    AttachmentRecord, AttachmentView, AuthorView, ColumnIndex, ColumnTag, CommentView,
    DeletedRemarkPolicy, NormalizedTaskView, PostRecord, RemarkId, RemarkRecord, ReplyRecord,
    ReplyView, TaskPriority, TaskStatus, TaskSummaryRecord, WorkerView, extract_rich_text,
    format_timestamp,
};
use std::collections::HashMap;

/// Everything the normalizer reads.
#[derive(Debug, Clone, Copy)]
pub struct AggregateSources<'a> {
    /// Locator result.
    pub summary: &'a TaskSummaryRecord,
    /// Detail result.
    pub post: &'a PostRecord,
    /// Full remark thread, oldest first.
    pub remarks: &'a [RemarkRecord],
    /// Replies keyed by remark id.
    pub replies: &'a HashMap<RemarkId, Vec<ReplyRecord>>,
}

fn first_non_empty<'a>(candidates: impl IntoIterator<Item = &'a str>) -> &'a str {
    candidates
        .into_iter()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn attachment_views<'a>(
    records: impl IntoIterator<Item = &'a AttachmentRecord>,
) -> Vec<AttachmentView> {
    records.into_iter().map(AttachmentView::from).collect()
}

fn reply_view(reply: &ReplyRecord) -> ReplyView {
    ReplyView {
        author: reply.author_name.clone(),
        content: reply.content.clone(),
        created_at: format_timestamp(&reply.created_at),
        attachments: attachment_views(&reply.attachments),
    }
}

fn comment_view(
    remark: &RemarkRecord,
    replies: &HashMap<RemarkId, Vec<ReplyRecord>>,
) -> CommentView {
    let remark_id = remark.id();
    let reply_views = replies
        .get(&remark_id)
        .map(|list| list.iter().map(reply_view).collect())
        .unwrap_or_default();
    let content = if remark.content.is_empty() {
        extract_rich_text(&remark.rich_content, "")
    } else {
        remark.content.clone()
    };

    CommentView {
        remark_id,
        author: remark.author_name.clone(),
        content,
        created_at: format_timestamp(&remark.created_at),
        is_system_remark: remark.is_system_remark(),
        is_delete_flagged: remark.is_delete_flagged(),
        reply_count: remark.reply_count(),
        attachments: attachment_views(
            remark
                .image_attachments
                .iter()
                .chain(&remark.file_attachments),
        ),
        replies: reply_views,
    }
}

/// Merges the pipeline's raw records into one view.
///
/// Task fields prefer the post's nested task record and fall back to the
/// summary's tagged columns. Remarks rejected by `policy` are dropped.
#[must_use]
pub fn normalize(
    sources: AggregateSources<'_>,
    policy: DeletedRemarkPolicy,
) -> NormalizedTaskView {
    let AggregateSources {
        summary,
        post,
        remarks,
        replies,
    } = sources;
    let columns = ColumnIndex::new(summary);
    let detail = post.task_detail().cloned().unwrap_or_default();

    let status_code =
        first_non_empty([detail.status.as_str(), columns.value(ColumnTag::Status)]).to_owned();
    let status = TaskStatus::from_code(&status_code);
    let priority = TaskPriority::from_code(&detail.priority);
    let progress = if detail.progress.is_empty() {
        "0"
    } else {
        detail.progress.as_str()
    };

    let workers = detail
        .workers
        .iter()
        .map(|worker| WorkerView {
            id: worker.id.clone(),
            name: worker.name.clone(),
            profile_image: worker.profile_image.clone(),
        })
        .collect();

    let comments = remarks
        .iter()
        .filter(|remark| policy.keeps(remark.is_delete_flagged()))
        .map(|remark| comment_view(remark, replies))
        .collect();

    NormalizedTaskView {
        task_number: first_non_empty([
            detail.task_number.as_str(),
            columns.value(ColumnTag::TaskNumber),
        ])
        .to_owned(),
        task_name: first_non_empty([
            detail.task_name.as_str(),
            columns.value(ColumnTag::TaskName),
            post.title.as_str(),
        ])
        .to_owned(),
        status_label: status.label().to_owned(),
        status,
        status_code,
        priority_label: priority.label().to_owned(),
        priority,
        progress: format!("{progress}%"),
        start_date: format_timestamp(&detail.start_date),
        end_date: format_timestamp(&detail.end_date),
        workers,
        author: AuthorView {
            id: post.author_id.clone(),
            name: post.author_name.clone(),
            department: post.author_department.clone(),
            position: post.author_position.clone(),
        },
        project_name: first_non_empty([post.project_name.as_str(), summary.project_name.as_str()])
            .to_owned(),
        project_id: first_non_empty([post.project_id.as_str(), summary.project_id.as_str()])
            .to_owned(),
        content: extract_rich_text(&post.content, &post.plain_content),
        created_at: format_timestamp(&post.created_at),
        updated_at: format_timestamp(columns.value(ColumnTag::EditedAt)),
        attachments: attachment_views(&post.attachments),
        comments,
        connect_url: post.connect_url.clone(),
    }
}
