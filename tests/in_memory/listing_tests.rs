//! Task listing tests against scripted platform responses.

use super::helpers::{CALLER, grid, grid_row, session, transport};
use flowtask::config::FlowSession;
use flowtask::task::{
    adapters::ScriptedFlowTransport,
    domain::ProjectId,
    ports::{FlowEndpoint, FlowTransportError},
    services::{FlowApiError, TaskListQuery, TaskListService},
};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rows_map_to_entries_with_paging_flag(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
) {
    transport.respond(
        FlowEndpoint::TaskList,
        grid(vec![grid_row("7", "C-7", "4"), grid_row("8", "C-8", "x")], true),
    );
    let service = TaskListService::new(Arc::clone(&transport), &session);

    let page = service
        .list(&TaskListQuery::default())
        .await
        .expect("listing succeeds");

    assert!(page.has_more);
    assert_eq!(page.entries.len(), 2);
    let first = &page.entries[0];
    assert_eq!(first.task_number, "7");
    assert_eq!(first.task_name, "Task 7");
    assert_eq!(first.status_label, "In progress");
    assert_eq!(first.end_date, "2024-03-01");
    assert_eq!(first.project_name, "Roadmap");
    assert_eq!(first.workers, vec!["Kim", "Choi"]);
    assert_eq!(page.entries[1].status_label, "Unknown");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_options_reach_the_request(
    session: FlowSession,
    transport: Arc<ScriptedFlowTransport>,
) {
    transport.respond(FlowEndpoint::TaskList, grid(Vec::new(), false));
    let service = TaskListService::new(Arc::clone(&transport), &session);
    let query = TaskListQuery::default()
        .with_assignee("teammate@example.com")
        .with_statuses(vec!["1".to_owned(), " ".to_owned()])
        .with_project(ProjectId::new("P-9"))
        .with_page(3);

    let page = service.list(&query).await.expect("listing succeeds");
    assert!(page.entries.is_empty());
    assert!(!page.has_more);

    let calls = transport.calls_to(FlowEndpoint::TaskList);
    let payload = &calls[0].payload;
    assert_eq!(payload["USER_ID"], CALLER);
    assert_eq!(payload["PG_NO"], 3);
    assert_eq!(payload["COLABO_SRNO"], "P-9");
    let filters = payload["FILTER_REC"].as_array().expect("filters present");
    assert_eq!(filters.len(), 2);
    assert_eq!(filters[0]["FILTER_DATA"], "teammate@example.com");
    assert_eq!(filters[1]["FILTER_DATA"], "1");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_failures_propagate(session: FlowSession, transport: Arc<ScriptedFlowTransport>) {
    transport.fail(
        FlowEndpoint::TaskList,
        FlowTransportError::Remote {
            code: "E401".to_owned(),
            message: "login required".to_owned(),
        },
    );
    let service = TaskListService::new(Arc::clone(&transport), &session);

    let result = service.list(&TaskListQuery::default()).await;

    assert!(matches!(&result, Err(err) if err.is_remote()));
    assert!(matches!(result, Err(FlowApiError::Transport(_))));
}
