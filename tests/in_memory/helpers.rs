//! Shared builders for in-memory integration tests.

use flowtask::config::{Credentials, FlowClientConfig, FlowSession};
use flowtask::task::{adapters::ScriptedFlowTransport, ports::FlowEndpoint};
use rstest::fixture;
use serde_json::{Value, json};
use std::sync::Arc;

/// Caller user id used by every session fixture.
pub const CALLER: &str = "me@example.com";

/// Provides a session with a small remark page.
#[fixture]
pub fn session() -> FlowSession {
    let credentials =
        Credentials::new("session-token", CALLER, "ORG-1").expect("fixture credentials are valid");
    FlowSession::new(
        credentials,
        FlowClientConfig::default().with_remark_page_size(2),
    )
}

/// Provides an empty scripted transport.
#[fixture]
pub fn transport() -> Arc<ScriptedFlowTransport> {
    Arc::new(ScriptedFlowTransport::new())
}

/// Builds a task grid row.
pub fn grid_row(task_number: &str, post: &str, status: &str) -> Value {
    json!({
        "COLABO_SRNO": "P-1",
        "COLABO_COMMT_SRNO": post,
        "COLABO_TTL": "Roadmap",
        "TASK_COLUMN_REC": [
            {"DEFAULT_COLUMN_TYPE": "TASK_NUM", "COLUMN_DATA_REC": [{"CUSTOM_COLUMN_DATA": task_number}]},
            {"DEFAULT_COLUMN_TYPE": "TASK_NM", "COLUMN_DATA_REC": [{"CUSTOM_COLUMN_DATA": format!("Task {task_number}")}]},
            {"DEFAULT_COLUMN_TYPE": "STTS", "COLUMN_DATA_REC": [{"CUSTOM_COLUMN_DATA": status}]},
            {"DEFAULT_COLUMN_TYPE": "END_DT", "COLUMN_DATA_REC": [{"CUSTOM_COLUMN_DATA": "20240301"}]},
            {"DEFAULT_COLUMN_TYPE": "WORKER_ID", "COLUMN_DATA_REC": [{"USER_NM": "Kim"}, {"USER_NM": "Choi"}]}
        ]
    })
}

/// Builds a task list response body.
pub fn grid(rows: Vec<Value>, has_more: bool) -> Value {
    json!({
        "COMMON_HEAD": {"ERROR": false, "MESSAGE": ""},
        "TASK_REC": rows,
        "NEXT_YN": if has_more { "Y" } else { "N" },
    })
}

/// Builds an embedded remark.
pub fn remark(id: &str, reply_count: u32) -> Value {
    json!({
        "COLABO_REMARK_SRNO": id,
        "RGSR_NM": "Kim",
        "REMARK_CNTN": format!("text of {id}"),
        "RGSN_DTTM": "20240102030405",
        "REPLY_CNT": reply_count,
    })
}

/// Builds a post detail response with `total` reported remarks.
pub fn detail(post: &str, remarks: Vec<Value>, total: u32) -> Value {
    json!({
        "COMMON_HEAD": {"ERROR": false},
        "COMMT_REC": [{
            "COLABO_SRNO": "P-1",
            "COLABO_COMMT_SRNO": post,
            "COLABO_TTL": "Roadmap",
            "COMMT_TTL": "Ship it",
            "CNTN": "plain body",
            "RGSR_NM": "Park",
            "COMMT_RGSN_DTTM": "20240101",
            "REMARK_CNT": total,
            "REMARK_REC": remarks,
            "IMG_ATCH_REC": [{"ORCP_FILE_NM": "diagram.png", "ATCH_URL": "https://files/diagram.png", "FILE_SIZE": 1024}],
            "TASK_REC": [{"STTS": "1", "TASK_NUM": "", "PROGRESS": "100"}]
        }]
    })
}

/// Builds a backfill response.
pub fn older(ids: &[&str]) -> Value {
    let remarks: Vec<Value> = ids
        .iter()
        .map(|id| json!({"COLABO_REMARK_SRNO": id, "REMARK_CNTN": format!("text of {id}"), "REPLY_CNT": "0"}))
        .collect();
    json!({"COMMON_HEAD": {"ERROR": false}, "COLABO_REMARK_REC": remarks})
}

/// Builds a reply list response.
pub fn reply_list(contents: &[&str]) -> Value {
    let replies: Vec<Value> = contents
        .iter()
        .map(|content| json!({"RGSR_NM": "Lee", "CNTN": content, "RGSN_DTTM": "20240105"}))
        .collect();
    json!({"COMMON_HEAD": {"ERROR": false}, "REPLY_REC": replies})
}

/// Scripts a transport with one task `7` on post `C-7`.
pub fn script_single_task(transport: &ScriptedFlowTransport, remarks: Vec<Value>, total: u32) {
    transport.respond(FlowEndpoint::TaskList, grid(vec![grid_row("7", "C-7", "4")], false));
    transport.respond(FlowEndpoint::PostDetail, detail("C-7", remarks, total));
}
