//! Completes the remark thread when the embedded page is short.

use super::api::FlowApi;
use crate::task::{
    domain::{PostRecord, RemarkId, RemarkRecord},
    ports::FlowTransport,
};
use tracing::{debug, warn};

/// Returns the anchor remark when the post reports more remarks than it
/// embeds and at least one remark is embedded.
#[must_use]
pub fn backfill_anchor(post: &PostRecord) -> Option<RemarkId> {
    let held = post.remarks.len();
    let total = usize::try_from(post.total_remark_count()).unwrap_or(usize::MAX);
    if total <= held {
        return None;
    }
    post.remarks.first().map(RemarkRecord::id)
}

/// Returns the post's remark thread, oldest first, with one page of older
/// remarks prepended when the embedded page is short.
///
/// A failed backfill is logged and the embedded remarks are returned alone.
pub async fn backfill_remarks<T>(api: &FlowApi<T>, post: &PostRecord) -> Vec<RemarkRecord>
where
    T: FlowTransport,
{
    let Some(anchor) = backfill_anchor(post) else {
        return post.remarks.clone();
    };

    match api
        .previous_remarks(&post.project(), &post.post(), &anchor)
        .await
    {
        Ok(response) => {
            debug!(
                anchor = %anchor,
                fetched = response.remarks.len(),
                "older remarks backfilled"
            );
            response
                .remarks
                .into_iter()
                .map(RemarkRecord::from)
                .chain(post.remarks.iter().cloned())
                .collect()
        }
        Err(err) => {
            warn!(anchor = %anchor, error = %err, "remark backfill failed; using embedded page");
            post.remarks.clone()
        }
    }
}
