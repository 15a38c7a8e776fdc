//! Task view aggregation pipeline.

use super::{
    api::{FlowApi, FlowApiError},
    backfill::backfill_remarks,
    detail::fetch_post,
    locator::locate_task,
    normalize::{AggregateSources, normalize},
    replies::expand_replies,
};
use crate::config::FlowSession;
use crate::task::{
    domain::{
        EnrichmentStrategy, NormalizedTaskView, PipelineOptions, TaskDomainError, TaskNumber,
    },
    ports::{FlowEndpoint, FlowTransport, FlowTransportError},
};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tracing::info;

/// Why a task view could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No task on the first page of the caller's list carries the number.
    NoMatchingTask,
    /// The task was listed but its post detail came back empty.
    NoDetail,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskViewOutcome {
    /// The task was found and aggregated.
    Found(Box<NormalizedTaskView>),
    /// The task could not be resolved.
    NotFound(NotFoundReason),
}

impl TaskViewOutcome {
    /// Returns the view when the task was found.
    #[must_use]
    pub fn into_view(self) -> Option<NormalizedTaskView> {
        match self {
            Self::Found(view) => Some(*view),
            Self::NotFound(_) => None,
        }
    }

    /// Returns whether the task could not be resolved.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Service-level errors for task view aggregation.
#[derive(Debug, Clone, Error)]
pub enum TaskViewError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// A locator or detail call failed.
    #[error(transparent)]
    Transport(#[from] FlowTransportError),
    /// A response did not match the expected record shape.
    #[error("unexpected {endpoint} response shape: {source}")]
    Decode {
        /// Endpoint called.
        endpoint: FlowEndpoint,
        /// Deserialization failure.
        source: Arc<serde_json::Error>,
    },
}

impl From<FlowApiError> for TaskViewError {
    fn from(err: FlowApiError) -> Self {
        match err {
            FlowApiError::Transport(inner) => Self::Transport(inner),
            FlowApiError::Decode { endpoint, source } => Self::Decode { endpoint, source },
        }
    }
}

/// Result type for task view aggregation.
pub type TaskViewResult<T> = Result<T, TaskViewError>;

/// Resolves task numbers into normalized task views.
pub struct TaskViewService<T>
where
    T: FlowTransport,
{
    api: FlowApi<T>,
    options: PipelineOptions,
    remark_page_size: u32,
}

impl<T> TaskViewService<T>
where
    T: FlowTransport,
{
    /// Creates a service with full enrichment.
    #[must_use]
    pub fn new(transport: Arc<T>, session: &FlowSession) -> Self {
        Self {
            api: FlowApi::new(transport, session.credentials_handle()),
            options: PipelineOptions::full_enrichment(),
            remark_page_size: session.config().remark_page_size,
        }
    }

    /// Replaces the pipeline options.
    #[must_use]
    pub const fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the normalized view of the caller's task `task_number`.
    ///
    /// Backfill and reply failures degrade the view instead of failing it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskViewError::Domain`] for a blank task number, and
    /// [`TaskViewError::Transport`] or [`TaskViewError::Decode`] when the
    /// locator or detail call fails.
    #[tracing::instrument(name = "task_view.get", skip(self), fields(strategy = ?self.options.strategy))]
    pub async fn get_by_number(&self, task_number: &str) -> TaskViewResult<TaskViewOutcome> {
        let number = TaskNumber::new(task_number)?;

        let Some(summary) = locate_task(&self.api, &number).await? else {
            info!(task = %number, "task not on the caller's first page");
            return Ok(TaskViewOutcome::NotFound(NotFoundReason::NoMatchingTask));
        };
        let Some(post) = fetch_post(&self.api, &summary, self.remark_page_size).await? else {
            info!(task = %number, "task detail came back empty");
            return Ok(TaskViewOutcome::NotFound(NotFoundReason::NoDetail));
        };

        let (remarks, replies) = match self.options.strategy {
            EnrichmentStrategy::FullEnrichment => {
                let remarks = backfill_remarks(&self.api, &post).await;
                let replies = expand_replies(&self.api, &post, &remarks).await;
                (remarks, replies)
            }
            EnrichmentStrategy::DetailOnly => (post.remarks.clone(), HashMap::new()),
        };

        let view = normalize(
            AggregateSources {
                summary: &summary,
                post: &post,
                remarks: &remarks,
                replies: &replies,
            },
            self.options.deleted_remarks,
        );
        info!(
            task = %number,
            comments = view.comments.len(),
            attachments = view.attachments.len(),
            "task view assembled"
        );
        Ok(TaskViewOutcome::Found(Box::new(view)))
    }
}
