//! Loads the primary post behind a located task.

use super::api::{FlowApi, FlowApiResult};
use crate::task::{
    domain::{PostRecord, TaskSummaryRecord},
    ports::FlowTransport,
};

/// Fetches the post for `summary` with the first `remark_page_size` remarks
/// embedded. Returns `None` when the platform sends an empty post list.
///
/// # Errors
///
/// Returns [`super::FlowApiError`] when the detail call fails.
pub async fn fetch_post<T>(
    api: &FlowApi<T>,
    summary: &TaskSummaryRecord,
    remark_page_size: u32,
) -> FlowApiResult<Option<PostRecord>>
where
    T: FlowTransport,
{
    let response = api
        .post_detail(&summary.project(), &summary.post(), remark_page_size)
        .await?;
    Ok(response.posts.into_iter().next())
}
