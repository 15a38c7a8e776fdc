//! Then steps for task view BDD scenarios.

use super::world::{TaskViewWorld, split_list};
use flowtask::task::{
    domain::NormalizedTaskView,
    ports::FlowEndpoint,
    services::TaskViewOutcome,
};
use rstest_bdd_macros::then;

fn found_view(world: &TaskViewWorld) -> Result<&NormalizedTaskView, eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was requested in scenario world"))?;
    match result {
        Ok(TaskViewOutcome::Found(view)) => Ok(view),
        Ok(TaskViewOutcome::NotFound(reason)) => {
            Err(eyre::eyre!("expected a task view, task was not found: {reason:?}"))
        }
        Err(err) => Err(eyre::eyre!("pipeline failed: {err}")),
    }
}

#[then(r#"the view lists comments "{ids}""#)]
fn view_lists_comments(world: &TaskViewWorld, ids: String) -> Result<(), eyre::Report> {
    let view = found_view(world)?;
    let actual: Vec<String> = view
        .comments
        .iter()
        .map(|comment| comment.remark_id.to_string())
        .collect();
    let expected = split_list(&ids);
    if actual != expected {
        return Err(eyre::eyre!("expected comments {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the task is reported as not found")]
fn task_reported_not_found(world: &TaskViewWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(outcome)) if outcome.is_not_found() => Ok(()),
        Some(Ok(_)) => Err(eyre::eyre!("expected not found, task was found")),
        Some(Err(err)) => Err(eyre::eyre!("expected not found, pipeline failed: {err}")),
        None => Err(eyre::eyre!("no task was requested in scenario world")),
    }
}

#[then("no post detail was requested")]
fn no_post_detail_requested(world: &TaskViewWorld) -> Result<(), eyre::Report> {
    let detail_calls = world.transport.calls_to(FlowEndpoint::PostDetail).len();
    if detail_calls != 0 {
        return Err(eyre::eyre!("expected no detail calls, found {detail_calls}"));
    }
    Ok(())
}

#[then(r#"comment "{id}" has {count:usize} replies"#)]
fn comment_has_replies(world: &TaskViewWorld, id: String, count: usize) -> Result<(), eyre::Report> {
    let view = found_view(world)?;
    let comment = view
        .comments
        .iter()
        .find(|comment| comment.remark_id.as_str() == id)
        .ok_or_else(|| eyre::eyre!("comment {id} missing from view"))?;
    if comment.replies.len() != count {
        return Err(eyre::eyre!(
            "expected {count} replies on {id}, found {}",
            comment.replies.len()
        ));
    }
    Ok(())
}

#[then("exactly {count:usize} platform calls were made")]
fn exact_call_count(world: &TaskViewWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world.transport.calls().len();
    if calls != count {
        return Err(eyre::eyre!("expected {count} platform calls, found {calls}"));
    }
    Ok(())
}
