//! Paged task listing.

use super::api::{FlowApi, FlowApiResult, TaskListQuery};
use crate::config::FlowSession;
use crate::task::{
    domain::{ColumnIndex, ColumnTag, TaskStatus, TaskSummaryRecord, format_timestamp},
    ports::FlowTransport,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// One row of the task grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListEntry {
    /// User-facing task number.
    pub task_number: String,
    /// Task name.
    pub task_name: String,
    /// Raw status code.
    pub status_code: String,
    /// Display label for the status.
    pub status_label: String,
    /// Formatted due date, or empty.
    pub end_date: String,
    /// Project display name.
    pub project_name: String,
    /// Project id.
    pub project_id: String,
    /// Assignee display names.
    pub workers: Vec<String>,
}

impl From<&TaskSummaryRecord> for TaskListEntry {
    fn from(summary: &TaskSummaryRecord) -> Self {
        let columns = ColumnIndex::new(summary);
        let status_code = columns.value(ColumnTag::Status).to_owned();
        Self {
            task_number: columns.value(ColumnTag::TaskNumber).to_owned(),
            task_name: columns.value(ColumnTag::TaskName).to_owned(),
            status_label: TaskStatus::from_code(&status_code).label().to_owned(),
            status_code,
            end_date: format_timestamp(columns.value(ColumnTag::EndDate)),
            project_name: summary.project_name.clone(),
            project_id: summary.project_id.clone(),
            workers: columns.user_names(ColumnTag::Workers),
        }
    }
}

/// One page of the task grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListPage {
    /// Rows in platform order.
    pub entries: Vec<TaskListEntry>,
    /// Whether a further page exists.
    pub has_more: bool,
}

/// Lists tasks page by page.
pub struct TaskListService<T>
where
    T: FlowTransport,
{
    api: FlowApi<T>,
}

impl<T> TaskListService<T>
where
    T: FlowTransport,
{
    /// Creates a listing service.
    #[must_use]
    pub fn new(transport: Arc<T>, session: &FlowSession) -> Self {
        Self {
            api: FlowApi::new(transport, session.credentials_handle()),
        }
    }

    /// Fetches one page matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`super::FlowApiError`] when the list call fails.
    #[tracing::instrument(name = "task_list.list", skip(self))]
    pub async fn list(&self, query: &TaskListQuery) -> FlowApiResult<TaskListPage> {
        let response = self.api.list_tasks(query).await?;
        let page = TaskListPage {
            entries: response.tasks.iter().map(TaskListEntry::from).collect(),
            has_more: response.has_more(),
        };
        debug!(entries = page.entries.len(), has_more = page.has_more, "task page listed");
        Ok(page)
    }
}
