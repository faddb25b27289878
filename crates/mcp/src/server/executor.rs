//! Drives one remote workflow to completion while emitting synthetic progress.
//!
//! The remote runtime exposes no completion percentage, so progress follows a
//! fixed decelerating curve: +5 per tick below 50, +1 per tick below 98, and
//! exactly one terminal 100 once the result is in hand.

use std::time::Duration;

use linkedapi_api::{LinkedApiError, Operation, WorkflowRuntime};
use linkedapi_types::{MappedResponse, OperationName};
use serde::Serialize;
use serde_json::Value;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::server::progress::{PROGRESS_TOTAL, ProgressReporter, WorkflowProgress};

pub const RESUME_TOOL_NAME: &str = "get_workflow_result";

const MIN_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);
const PROGRESS_TICKS_PER_BUDGET: u32 = 20;
const FAST_PHASE_LIMIT: u8 = 50;
const SLOW_PHASE_LIMIT: u8 = 98;

/// Whether to start a new workflow or re-attach to a running one.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowMode {
    Start(Value),
    Resume(String),
}

/// A workflow still running remotely after the local wait budget ran out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingWorkflow {
    pub message: String,
    pub workflow_id: String,
    pub operation_name: OperationName,
}

impl PendingWorkflow {
    pub fn new(workflow_id: String, operation_name: OperationName) -> Self {
        let message = format!(
            "Workflow {workflow_id} ({operation_name}) is still running in the background. This is the normal behaviour for long Linked API operations.\n\
             Do NOT call the original tool again: that would start a second, duplicate workflow.\n\
             Instead call the {RESUME_TOOL_NAME} tool with exactly these values:\n\
             - workflowId: {workflow_id}\n\
             - operationName: {operation_name}\n\
             If {RESUME_TOOL_NAME} reports that the workflow is still running, call it again with the same values until it returns the final result."
        );
        Self {
            message,
            workflow_id,
            operation_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Completed(MappedResponse<Value>),
    Pending(PendingWorkflow),
}

/// Tick period: about twenty updates per budget, never faster than every ten seconds.
pub fn progress_interval(workflow_timeout: Duration) -> Duration {
    (workflow_timeout / PROGRESS_TICKS_PER_BUDGET).max(MIN_PROGRESS_INTERVAL)
}

pub fn next_progress(current: u8) -> u8 {
    let next = if current < FAST_PHASE_LIMIT {
        current + 5
    } else if current < SLOW_PHASE_LIMIT {
        current + 1
    } else {
        current
    };
    next.min(PROGRESS_TOTAL - 1)
}

/// Execute or resume one workflow.
///
/// `execute` is called at most once and only in [`WorkflowMode::Start`]. A
/// wait that outlives `workflow_timeout` becomes [`WorkflowOutcome::Pending`];
/// every other failure is returned unchanged. The progress timer lives only
/// inside this call and is dropped on every exit path.
pub async fn execute_with_progress(
    runtime: &dyn WorkflowRuntime,
    operation: &Operation,
    mode: WorkflowMode,
    workflow_timeout: Duration,
    reporter: &dyn ProgressReporter,
) -> Result<WorkflowOutcome, LinkedApiError> {
    let operation_name = operation.name;
    let workflow_id = match mode {
        WorkflowMode::Start(params) => {
            let workflow_id = operation.execute(runtime, &params).await?;
            info!(%workflow_id, %operation_name, "workflow started");
            workflow_id
        }
        WorkflowMode::Resume(workflow_id) => {
            info!(%workflow_id, %operation_name, "resuming workflow");
            workflow_id
        }
    };

    let mut progress = 0;
    reporter.report(WorkflowProgress::new(progress, format!("Starting workflow {operation_name}...")));

    let period = progress_interval(workflow_timeout);
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let result = operation.result(runtime, &workflow_id, workflow_timeout);
    tokio::pin!(result);
    let outcome = loop {
        tokio::select! {
            biased;
            outcome = &mut result => break outcome,
            _ = ticker.tick() => {
                progress = next_progress(progress);
                reporter.report(WorkflowProgress::new(progress, format!("Executing workflow {operation_name}...")));
            }
        }
    };
    drop(ticker);

    match outcome {
        Ok(response) => {
            reporter.report(WorkflowProgress::new(
                PROGRESS_TOTAL,
                format!("Workflow {operation_name} completed successfully"),
            ));
            Ok(WorkflowOutcome::Completed(response))
        }
        Err(LinkedApiError::WorkflowTimeout {
            workflow_id,
            operation_name,
        }) => {
            debug!(%workflow_id, %operation_name, ?workflow_timeout, "wait budget exhausted; handing back resume identifiers");
            Ok(WorkflowOutcome::Pending(PendingWorkflow::new(workflow_id, operation_name)))
        }
        Err(error) => Err(error),
    }
}
