//! Given steps for task view BDD scenarios.

use super::world::{TaskViewWorld, split_list};
use flowtask::task::{
    domain::PipelineOptions,
    ports::{FlowEndpoint, FlowTransportError},
};
use rstest_bdd_macros::given;
use serde_json::{Value, json};

fn remark(id: &str) -> Value {
    json!({
        "COLABO_REMARK_SRNO": id,
        "RGSR_NM": "Kim",
        "REMARK_CNTN": format!("text of {id}"),
        "REPLY_CNT": "1",
    })
}

#[given(r#"task "{number}" is on the caller's first page"#)]
fn task_on_first_page(world: &mut TaskViewWorld, number: String) {
    let post_id = format!("POST-{number}");
    world.transport.respond(
        FlowEndpoint::TaskList,
        json!({
            "TASK_REC": [{
                "COLABO_SRNO": "PROJECT",
                "COLABO_COMMT_SRNO": post_id,
                "TASK_COLUMN_REC": [
                    {"DEFAULT_COLUMN_TYPE": "TASK_NUM", "COLUMN_DATA_REC": [{"CUSTOM_COLUMN_DATA": number}]}
                ]
            }],
            "NEXT_YN": "N"
        }),
    );
    world.post_id = Some(post_id);
}

#[given(r#"its post embeds remarks "{ids}" out of {total:u32}"#)]
fn post_embeds_remarks(
    world: &mut TaskViewWorld,
    ids: String,
    total: u32,
) -> Result<(), eyre::Report> {
    let post_id = world
        .post_id
        .clone()
        .ok_or_else(|| eyre::eyre!("no task was listed in scenario world"))?;
    let remarks: Vec<Value> = split_list(&ids).iter().map(|id| remark(id)).collect();
    world.transport.respond(
        FlowEndpoint::PostDetail,
        json!({
            "COMMT_REC": [{
                "COLABO_SRNO": "PROJECT",
                "COLABO_COMMT_SRNO": post_id,
                "REMARK_CNT": total,
                "REMARK_REC": remarks
            }]
        }),
    );
    Ok(())
}

#[given(r#"the platform returns older remarks "{ids}""#)]
fn platform_returns_older_remarks(world: &mut TaskViewWorld, ids: String) {
    let remarks: Vec<Value> = split_list(&ids)
        .iter()
        .map(|id| json!({"COLABO_REMARK_SRNO": id, "REPLY_CNT": "0"}))
        .collect();
    world.transport.respond(
        FlowEndpoint::PreviousRemarks,
        json!({"COLABO_REMARK_REC": remarks}),
    );
}

#[given(r#"remark "{id}" has replies "{contents}""#)]
fn remark_has_replies(world: &mut TaskViewWorld, id: String, contents: String) {
    let replies: Vec<Value> = split_list(&contents)
        .iter()
        .map(|content| json!({"RGSR_NM": "Lee", "CNTN": content}))
        .collect();
    world.transport.respond_when(
        FlowEndpoint::ReplyList,
        "COLABO_REMARK_SRNO",
        id,
        json!({"REPLY_REC": replies}),
    );
}

#[given(r#"replies for remark "{id}" cannot be fetched"#)]
fn replies_cannot_be_fetched(world: &mut TaskViewWorld, id: String) {
    world.transport.fail_when(
        FlowEndpoint::ReplyList,
        "COLABO_REMARK_SRNO",
        id,
        FlowTransportError::Timeout(FlowEndpoint::ReplyList),
    );
}

#[given("the detail-only strategy is selected")]
fn detail_only_selected(world: &mut TaskViewWorld) {
    world.options = PipelineOptions::detail_only();
}
