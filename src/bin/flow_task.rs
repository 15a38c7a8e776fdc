//! Prints Flow task views and task lists as JSON.
//!
//! Usage:
//!
//! ```text
//! flow_task get <task-number>
//! flow_task list [status-code...]
//! ```
//!
//! Credentials come from `FLOW_ACCESS_TOKEN`, `FLOW_USER_ID`, and
//! `FLOW_USE_INTT_ID`. `FLOW_BASE_URL`, `FLOW_REQUEST_TIMEOUT_SECS`, and
//! `FLOW_REMARK_PAGE_SIZE` are optional. Logs go to stderr and are filtered
//! with `RUST_LOG`.
//!
//! A task that cannot be resolved exits with status 2 and a message on
//! stderr; every other failure exits with status 1.

use flowtask::config::FlowSession;
use flowtask::task::{
    adapters::HttpFlowTransport,
    services::{
        NotFoundReason, TaskListQuery, TaskListService, TaskViewOutcome, TaskViewService,
    },
};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const NOT_FOUND_EXIT: u8 = 2;

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Get(String),
    List(Vec<String>),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, CliError> {
    let _program = args.next();
    let command = args
        .next()
        .ok_or_else(|| CliError::InvalidArgs("missing command (get or list)".into()))?;
    match command.as_str() {
        "get" => {
            let number = args
                .next()
                .ok_or_else(|| CliError::InvalidArgs("missing task number".into()))?;
            if let Some(extra) = args.next() {
                return Err(CliError::InvalidArgs(format!(
                    "unexpected extra argument: {extra}"
                )));
            }
            Ok(Command::Get(number))
        }
        "list" => Ok(Command::List(args.collect())),
        other => Err(CliError::InvalidArgs(format!("unknown command: {other}"))),
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_json(value: &impl Serialize) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value).map_err(CliError::Encode)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").map_err(CliError::Write)
}

fn not_found_message(number: &str, reason: NotFoundReason) -> String {
    match reason {
        NotFoundReason::NoMatchingTask => {
            format!("task {number} not found on the first page of your assigned tasks")
        }
        NotFoundReason::NoDetail => format!("task {number} has no post detail"),
    }
}

async fn run(command: Command, session: FlowSession) -> Result<ExitCode, BoxError> {
    let transport = Arc::new(HttpFlowTransport::new(session.config())?);
    match command {
        Command::Get(number) => {
            let service = TaskViewService::new(transport, &session);
            match service.get_by_number(&number).await? {
                TaskViewOutcome::Found(view) => {
                    write_json(&view)?;
                    Ok(ExitCode::SUCCESS)
                }
                TaskViewOutcome::NotFound(reason) => {
                    writeln!(io::stderr(), "{}", not_found_message(&number, reason))?;
                    Ok(ExitCode::from(NOT_FOUND_EXIT))
                }
            }
        }
        Command::List(statuses) => {
            let service = TaskListService::new(transport, &session);
            let query = TaskListQuery::assigned_to_caller().with_statuses(statuses);
            let page = service.list(&query).await?;
            write_json(&page)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode, BoxError> {
    init_tracing();
    let command = parse_args(env::args())?;
    let session = FlowSession::from_env()?;
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(command, session))
}
