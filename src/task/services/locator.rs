//! Resolves a user-facing task number to its summary record.

use super::api::{FlowApi, FlowApiResult, TaskListQuery};
use crate::task::{
    domain::{ColumnIndex, ColumnTag, TaskNumber, TaskSummaryRecord},
    ports::FlowTransport,
};
use tracing::debug;

/// Finds the caller's task whose `TASK_NUM` column matches `number`.
///
/// Only the first page of the caller's assigned tasks is searched, so a task
/// listed further down is reported as absent.
///
/// # Errors
///
/// Returns [`super::FlowApiError`] when the list call fails.
pub async fn locate_task<T>(
    api: &FlowApi<T>,
    number: &TaskNumber,
) -> FlowApiResult<Option<TaskSummaryRecord>>
where
    T: FlowTransport,
{
    let page = api.list_tasks(&TaskListQuery::assigned_to_caller()).await?;
    debug!(candidates = page.tasks.len(), "task list page loaded");
    Ok(find_task(page.tasks, number))
}

/// Returns the first summary whose task number column equals `number`.
#[must_use]
pub fn find_task(
    summaries: impl IntoIterator<Item = TaskSummaryRecord>,
    number: &TaskNumber,
) -> Option<TaskSummaryRecord> {
    summaries
        .into_iter()
        .find(|summary| ColumnIndex::new(summary).value(ColumnTag::TaskNumber) == number.as_str())
}
