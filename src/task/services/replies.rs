//! Fans out nested-reply fetches across a remark thread.

use super::api::FlowApi;
use crate::task::{
    domain::{PostRecord, RemarkId, RemarkRecord, ReplyRecord},
    ports::FlowTransport,
};
use futures::future::join_all;
use std::collections::HashMap;
use tracing::warn;

/// Fetches replies for every remark with a positive reply count.
///
/// Fetches run concurrently. A failed fetch yields an empty list for that
/// remark only. Remarks without replies are absent from the map.
pub async fn expand_replies<T>(
    api: &FlowApi<T>,
    post: &PostRecord,
    remarks: &[RemarkRecord],
) -> HashMap<RemarkId, Vec<ReplyRecord>>
where
    T: FlowTransport,
{
    let project_id = post.project();
    let post_id = post.post();
    let caller_org = api.caller_org();
    let (project_ref, post_ref) = (&project_id, &post_id);

    let fetches = remarks
        .iter()
        .filter(|remark| remark.reply_count() > 0)
        .map(|remark| {
            let remark_id = remark.id();
            let author_org = remark.reply_org_id(&caller_org);
            async move {
                let fetched = match api
                    .replies(project_ref, post_ref, &remark_id, &author_org)
                    .await
                {
                    Ok(response) => response.replies,
                    Err(err) => {
                        warn!(remark = %remark_id, error = %err, "reply fetch failed");
                        Vec::new()
                    }
                };
                (remark_id, fetched)
            }
        });

    join_all(fetches).await.into_iter().collect()
}
