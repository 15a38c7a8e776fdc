//! Typed calls over the transport port.
//!
//! Every request document carries the caller's user id and session token in
//! the body; the transport never sees credentials separately.

use crate::config::Credentials;
use crate::task::{
    domain::{
        OrgId, PostDetailResponse, PostId, PreviousRemarksResponse, ProjectId, RemarkId,
        ReplyListResponse, TaskListResponse,
    },
    ports::{FlowEndpoint, FlowTransport, FlowTransportError},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

/// Filter column for the task assignee.
const ASSIGNEE_COLUMN: &str = "1";
/// Filter column for the task status.
const STATUS_COLUMN: &str = "9";

/// Errors returned by typed platform calls.
#[derive(Debug, Clone, Error)]
pub enum FlowApiError {
    /// Transport or envelope failure.
    #[error(transparent)]
    Transport(#[from] FlowTransportError),

    /// The body passed the envelope check but did not match the record shape.
    #[error("unexpected {endpoint} response shape: {source}")]
    Decode {
        /// Endpoint called.
        endpoint: FlowEndpoint,
        /// Deserialization failure.
        source: Arc<serde_json::Error>,
    },
}

impl FlowApiError {
    /// Returns whether the platform itself reported the failure.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_remote(),
            Self::Decode { .. } => false,
        }
    }
}

/// Result type for typed platform calls.
pub type FlowApiResult<T> = Result<T, FlowApiError>;

/// Parameters for one task list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Assignee user id; `None` means the caller.
    pub assignee: Option<String>,
    /// Status codes; empty means any status.
    pub statuses: Vec<String>,
    /// Restricts the list to one project.
    pub project_id: Option<ProjectId>,
    /// One-based page number.
    pub page: u32,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self::assigned_to_caller()
    }
}

impl TaskListQuery {
    /// First page of the caller's own tasks, any status.
    #[must_use]
    pub const fn assigned_to_caller() -> Self {
        Self {
            assignee: None,
            statuses: Vec::new(),
            project_id: None,
            page: 1,
        }
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the status codes.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = String>) -> Self {
        self.statuses = statuses
            .into_iter()
            .map(|status| status.trim().to_owned())
            .filter(|status| !status.is_empty())
            .collect();
        self
    }

    /// Restricts the list to one project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the page number; zero is treated as the first page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Typed client for the platform endpoints.
pub struct FlowApi<T>
where
    T: FlowTransport,
{
    transport: Arc<T>,
    credentials: Arc<Credentials>,
}

impl<T> Clone for FlowApi<T>
where
    T: FlowTransport,
{
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            credentials: Arc::clone(&self.credentials),
        }
    }
}

impl<T> FlowApi<T>
where
    T: FlowTransport,
{
    /// Creates a typed client.
    #[must_use]
    pub const fn new(transport: Arc<T>, credentials: Arc<Credentials>) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Caller org id, the fallback for reply lookups.
    #[must_use]
    pub fn caller_org(&self) -> OrgId {
        OrgId::new(self.credentials.org_id())
    }

    async fn call<R>(&self, endpoint: FlowEndpoint, payload: Value) -> FlowApiResult<R>
    where
        R: DeserializeOwned,
    {
        let body = self.transport.send(endpoint, payload).await?;
        serde_json::from_value(body).map_err(|err| FlowApiError::Decode {
            endpoint,
            source: Arc::new(err),
        })
    }

    /// Fetches one page of the task grid.
    ///
    /// # Errors
    ///
    /// Returns [`FlowApiError`] on transport, envelope, or shape failures.
    pub async fn list_tasks(&self, query: &TaskListQuery) -> FlowApiResult<TaskListResponse> {
        let user_id = self.credentials.user_id();
        let assignee = query.assignee.as_deref().unwrap_or(user_id);

        let mut filters = vec![json!({
            "FILTER_DATA": assignee,
            "USER_REC": [{ "USER_ID": assignee }],
            "COLUMN_SRNO": ASSIGNEE_COLUMN,
            "OPERATOR_TYPE": "EQUAL",
        })];
        filters.extend(query.statuses.iter().map(|status| {
            json!({
                "COLUMN_SRNO": STATUS_COLUMN,
                "FILTER_DATA": status,
                "OPERATOR_TYPE": "CATEGORY",
            })
        }));

        let payload = json!({
            "USER_ID": user_id,
            "RGSN_DTTM": self.credentials.access_token(),
            "USE_INTT_ID": self.credentials.org_id(),
            "packetOption": 2,
            "PG_NO": query.page.max(1),
            "USAGE_TYPE": "ALL",
            "USAGE_FEATURE": "TASK",
            "USAGE_SRNO": -1,
            "COLABO_SRNO": query.project_id.as_ref().map_or("", ProjectId::as_str),
            "filterRootId": "taskFilterArea",
            "gridRootId": "taskContainerArea",
            "pageCode": "task",
            "SEARCH_WORD": "",
            "SORT_REC": [],
            "FILTER_REC": filters,
        });
        self.call(FlowEndpoint::TaskList, payload).await
    }

    /// Fetches a post with the first `remark_page_size` remarks embedded.
    ///
    /// # Errors
    ///
    /// Returns [`FlowApiError`] on transport, envelope, or shape failures.
    pub async fn post_detail(
        &self,
        project: &ProjectId,
        post: &PostId,
        remark_page_size: u32,
    ) -> FlowApiResult<PostDetailResponse> {
        let payload = json!({
            "USER_ID": self.credentials.user_id(),
            "RGSN_DTTM": self.credentials.access_token(),
            "GUBUN": "DETAIL",
            "COLABO_SRNO": project,
            "COLABO_COMMT_SRNO": post,
            "COLABO_REMARK_SRNO": "-1",
            "RENEWAL_YN": "Y",
            "PG_NO": 1,
            "PG_PER_CNT": remark_page_size,
            "COPY_YN": "N",
        });
        self.call(FlowEndpoint::PostDetail, payload).await
    }

    /// Fetches remarks older than `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowApiError`] on transport, envelope, or shape failures.
    pub async fn previous_remarks(
        &self,
        project: &ProjectId,
        post: &PostId,
        anchor: &RemarkId,
    ) -> FlowApiResult<PreviousRemarksResponse> {
        let payload = json!({
            "USER_ID": self.credentials.user_id(),
            "RGSN_DTTM": self.credentials.access_token(),
            "MODE": "M",
            "ORDER_TYPE": "P",
            "COLABO_SRNO": project,
            "COLABO_COMMT_SRNO": post,
            "SRCH_COLABO_REMARK_SRNO": anchor,
            "REPEAT_DTTM": "",
            "REMARK_FILTER": "",
            "packetOption": 1,
        });
        self.call(FlowEndpoint::PreviousRemarks, payload).await
    }

    /// Fetches the nested replies of one remark.
    ///
    /// # Errors
    ///
    /// Returns [`FlowApiError`] on transport, envelope, or shape failures.
    pub async fn replies(
        &self,
        project: &ProjectId,
        post: &PostId,
        remark: &RemarkId,
        author_org: &OrgId,
    ) -> FlowApiResult<ReplyListResponse> {
        let payload = json!({
            "USER_ID": self.credentials.user_id(),
            "RGSN_DTTM": self.credentials.access_token(),
            "COLABO_SRNO": project,
            "COLABO_COMMT_SRNO": post,
            "COLABO_REMARK_SRNO": remark,
            "RGSR_USE_INTT_ID": author_org,
            "packetOption": "PREVENT_EXECUTE",
        });
        self.call(FlowEndpoint::ReplyList, payload).await
    }
}
