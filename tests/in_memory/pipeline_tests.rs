//! Task view pipeline tests against scripted platform responses.

use super::helpers::{
    older, remark, reply_list, script_single_task, session, transport,
};
use flowtask::config::FlowSession;
use flowtask::task::{
    adapters::ScriptedFlowTransport,
    domain::{AttachmentOrigin, DeletedRemarkPolicy, PipelineOptions},
    ports::{FlowEndpoint, FlowTransportError},
    services::{TaskViewOutcome, TaskViewService},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_enrichment_assembles_the_whole_thread(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
) {
    script_single_task(&transport, vec![remark("R3", 1), remark("R4", 0)], 4);
    transport.respond(FlowEndpoint::PreviousRemarks, older(&["R1", "R2"]));
    transport.respond(FlowEndpoint::ReplyList, reply_list(&["looks good"]));
    let service = TaskViewService::new(Arc::clone(&transport), &session);

    let outcome = service.get_by_number("7").await.expect("pipeline succeeds");
    let TaskViewOutcome::Found(view) = outcome else {
        panic!("task 7 should be found");
    };

    let ids: Vec<&str> = view.comments.iter().map(|c| c.remark_id.as_str()).collect();
    assert_eq!(ids, vec!["R1", "R2", "R3", "R4"]);
    assert_eq!(view.task_number, "7");
    assert_eq!(view.task_name, "Task 7");
    assert_eq!(view.status_label, "Completed");
    assert_eq!(view.progress, "100%");
    assert_eq!(view.content, "plain body");
    assert_eq!(view.created_at, "2024-01-01");
    assert_eq!(view.attachments[0].file_size, "1024");
    assert_eq!(view.comments[2].replies[0].content, "looks good");

    let detail_calls = transport.calls_to(FlowEndpoint::PostDetail);
    assert_eq!(detail_calls[0].payload["PG_PER_CNT"], 2);
    assert_eq!(transport.calls_to(FlowEndpoint::ReplyList).len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_only_skips_backfill_and_replies(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
) {
    script_single_task(&transport, vec![remark("R3", 4)], 9);
    let service = TaskViewService::new(Arc::clone(&transport), &session)
        .with_options(PipelineOptions::detail_only());

    let view = service
        .get_by_number("7")
        .await
        .expect("pipeline succeeds")
        .into_view()
        .expect("task 7 should be found");

    assert_eq!(view.comments.len(), 1);
    assert!(view.comments[0].replies.is_empty());
    let endpoints: Vec<FlowEndpoint> = transport.calls().iter().map(|c| c.endpoint).collect();
    assert_eq!(
        endpoints,
        vec![FlowEndpoint::TaskList, FlowEndpoint::PostDetail]
    );
}

#[rstest]
#[case(DeletedRemarkPolicy::Retain, vec!["R1", "R2"])]
#[case(DeletedRemarkPolicy::Hide, vec!["R1"])]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_remark_policy_is_configurable(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
    #[case] policy: DeletedRemarkPolicy,
    #[case] expected: Vec<&str>,
) {
    let mut deleted = remark("R2", 0);
    deleted["DELETE_YN"] = serde_json::json!("Y");
    script_single_task(&transport, vec![remark("R1", 0), deleted], 2);
    let service = TaskViewService::new(Arc::clone(&transport), &session)
        .with_options(PipelineOptions::full_enrichment().with_deleted_remarks(policy));

    let view = service
        .get_by_number("7")
        .await
        .expect("pipeline succeeds")
        .into_view()
        .expect("task 7 should be found");

    let ids: Vec<&str> = view.comments.iter().map(|c| c.remark_id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn degraded_fetches_never_fail_the_pipeline(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
) {
    script_single_task(&transport, vec![remark("R3", 2)], 3);
    transport.fail(
        FlowEndpoint::PreviousRemarks,
        FlowTransportError::Status {
            endpoint: FlowEndpoint::PreviousRemarks,
            status: 500,
        },
    );
    transport.fail(
        FlowEndpoint::ReplyList,
        FlowTransportError::Timeout(FlowEndpoint::ReplyList),
    );
    let service = TaskViewService::new(Arc::clone(&transport), &session);

    let view = service
        .get_by_number("7")
        .await
        .expect("degraded fetches are absorbed")
        .into_view()
        .expect("task 7 should be found");

    assert_eq!(view.comments.len(), 1);
    assert!(view.comments[0].replies.is_empty());
    assert_eq!(view.comments[0].reply_count, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attachment_inventory_covers_body_comments_and_replies(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
) {
    let mut with_file = remark("R1", 1);
    with_file["REMARK_ATCH_REC"] =
        serde_json::json!([{"ORCP_FILE_NM": "notes.pdf", "ATCH_URL": "https://files/notes.pdf"}]);
    script_single_task(&transport, vec![with_file], 1);
    transport.respond(
        FlowEndpoint::ReplyList,
        serde_json::json!({"REPLY_REC": [{"CNTN": "pic", "IMG_ATCH_REC": [{"ORCP_FILE_NM": "pic.jpg", "ATCH_URL": "https://files/pic.jpg"}]}]}),
    );
    let service = TaskViewService::new(Arc::clone(&transport), &session);

    let view = service
        .get_by_number("7")
        .await
        .expect("pipeline succeeds")
        .into_view()
        .expect("task 7 should be found");

    let inventory: Vec<(AttachmentOrigin, &str)> = view
        .attachment_refs()
        .into_iter()
        .map(|item| (item.origin, item.attachment.file_name.as_str()))
        .collect();
    assert_eq!(
        inventory,
        vec![
            (AttachmentOrigin::Body, "diagram.png"),
            (AttachmentOrigin::Comment { comment: 0 }, "notes.pdf"),
            (
                AttachmentOrigin::Reply {
                    comment: 0,
                    reply: 0
                },
                "pic.jpg"
            ),
        ]
    );
}
