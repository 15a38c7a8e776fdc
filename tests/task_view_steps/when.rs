//! When steps for task view BDD scenarios.

use super::world::{TaskViewWorld, run_async};
use flowtask::task::services::TaskViewService;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when(r#"the caller requests task "{number}""#)]
fn caller_requests_task(world: &mut TaskViewWorld, number: String) {
    let service = TaskViewService::new(Arc::clone(&world.transport), &world.session)
        .with_options(world.options);
    world.last_result = Some(run_async(service.get_by_number(&number)));
}
