//! Shared world state for task view BDD scenarios.

use flowtask::config::{Credentials, FlowClientConfig, FlowSession};
use flowtask::task::{
    adapters::ScriptedFlowTransport,
    domain::PipelineOptions,
    services::{TaskViewOutcome, TaskViewResult},
};
use rstest::fixture;
use std::sync::Arc;

/// Scenario world for task view behaviour tests.
pub struct TaskViewWorld {
    pub session: FlowSession,
    pub transport: Arc<ScriptedFlowTransport>,
    pub options: PipelineOptions,
    pub post_id: Option<String>,
    pub last_result: Option<TaskViewResult<TaskViewOutcome>>,
}

impl TaskViewWorld {
    /// Creates a world with an empty script and full enrichment.
    ///
    /// # Panics
    ///
    /// Panics if the fixed test credentials are rejected.
    #[must_use]
    pub fn new() -> Self {
        let credentials = Credentials::new("bdd-token", "bdd@example.com", "ORG-BDD")
            .expect("fixed credentials are valid");
        Self {
            session: FlowSession::new(credentials, FlowClientConfig::default()),
            transport: Arc::new(ScriptedFlowTransport::new()),
            options: PipelineOptions::full_enrichment(),
            post_id: None,
            last_result: None,
        }
    }
}

impl Default for TaskViewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskViewWorld {
    TaskViewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
