//! Single entry point for `tools/call`.
//!
//! Every outcome, including panics inside a handler, is turned into one text
//! content block. Nothing below this layer reaches the transport as a fault.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use chrono::{DateTime, TimeDelta};
use futures_util::FutureExt;
use linkedapi_api::{ConversationKind, ConversationPollRequest, LinkedApiError, OperationRegistry, WorkflowRuntime};
use linkedapi_types::{MappedResponse, OperationName};
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::server::errors::linked_api_error_body;
use crate::server::executor::{WorkflowMode, WorkflowOutcome, execute_with_progress};
use crate::server::progress::ProgressReporter;
use crate::server::tools::schemas::{GetApiUsageParams, GetConversationParams, GetWorkflowResultParams};
use crate::server::tools::{InvalidArguments, ToolHandler, ToolSet, ToolSetError, ToolSpec};

const MAX_USAGE_PERIOD_DAYS: i64 = 30;
const COMPLETED_TEXT: &str = "Completed";

/// Everything a single call needs besides its arguments.
#[derive(Clone, Copy)]
pub struct InvocationContext<'a> {
    /// Built for this request only, carrying the caller's credentials.
    pub runtime: &'a dyn WorkflowRuntime,
    pub workflow_timeout: Duration,
    pub reporter: &'a dyn ProgressReporter,
}

#[derive(Debug, Error)]
enum DispatchError {
    #[error(transparent)]
    InvalidArguments(#[from] InvalidArguments),
    #[error("Operation not found: {0}")]
    UnknownOperation(String),
    #[error(transparent)]
    Remote(#[from] LinkedApiError),
    #[error("failed to encode tool output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Tool table plus operation catalog; read-only once built.
#[derive(Debug)]
pub struct ToolDispatcher {
    tools: ToolSet,
    registry: OperationRegistry,
}

impl ToolDispatcher {
    pub fn new(tools: ToolSet, registry: OperationRegistry) -> Self {
        Self { tools, registry }
    }

    pub fn standard() -> Result<Self, ToolSetError> {
        Ok(Self::new(ToolSet::standard()?, OperationRegistry::standard()))
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>, context: InvocationContext<'_>) -> CallToolResult {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "Unknown tool requested");
            return text_result(format!("Unknown tool: {name}"));
        };

        let started = Instant::now();
        info!(tool = name, "Tool execution started");
        let outcome = AssertUnwindSafe(self.run(tool, arguments, context)).catch_unwind().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(text)) => {
                info!(tool = name, elapsed_ms, "Tool execution successful");
                text_result(text)
            }
            Ok(Err(DispatchError::Remote(remote))) if remote.is_domain() => {
                let body = linked_api_error_body(&remote);
                error!(tool = name, elapsed_ms, %body, "Tool execution failed with Linked API error");
                text_result(pretty(&body))
            }
            Ok(Err(error)) => {
                error!(tool = name, elapsed_ms, %error, "Tool execution failed");
                text_result(render_error(name, error))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(tool = name, elapsed_ms, panic = %message, "Tool execution failed with unknown error");
                text_result(format!("Error executing {name}: {message}"))
            }
        }
    }

    async fn run(&self, tool: &ToolSpec, arguments: Option<JsonObject>, context: InvocationContext<'_>) -> Result<String, DispatchError> {
        let arguments = tool.prepare_arguments(arguments)?;

        match tool.handler {
            ToolHandler::Workflow {
                operation,
                completion_text,
            } => {
                let operation = self
                    .registry
                    .get(operation)
                    .ok_or_else(|| DispatchError::UnknownOperation(operation.to_string()))?;
                let outcome = execute_with_progress(
                    context.runtime,
                    operation,
                    WorkflowMode::Start(arguments),
                    context.workflow_timeout,
                    context.reporter,
                )
                .await?;
                render_outcome(tool.name, outcome, completion_text)
            }
            ToolHandler::ResumeWorkflow => {
                let params: GetWorkflowResultParams = typed_arguments(tool, arguments)?;
                let operation = self
                    .registry
                    .find(&params.operation_name)
                    .map_err(|_| DispatchError::UnknownOperation(params.operation_name.clone()))?;
                let outcome = execute_with_progress(
                    context.runtime,
                    operation,
                    WorkflowMode::Resume(params.workflow_id),
                    context.workflow_timeout,
                    context.reporter,
                )
                .await?;
                render_outcome(tool.name, outcome, None)
            }
            ToolHandler::ApiUsage => {
                let params: GetApiUsageParams = typed_arguments(tool, arguments)?;
                validate_usage_period(tool, &params)?;
                let usage = context.runtime.api_usage(&params.start, &params.end).await?;
                render_response(tool.name, usage, None)
            }
            ToolHandler::Conversation(kind) => {
                let params: GetConversationParams = typed_arguments(tool, arguments)?;
                self.read_conversation(tool.name, kind, params, context).await
            }
        }
    }

    /// Poll the conversation; when it cannot be read yet, sync it and poll once more.
    async fn read_conversation(
        &self,
        tool_name: &str,
        kind: ConversationKind,
        params: GetConversationParams,
        context: InvocationContext<'_>,
    ) -> Result<String, DispatchError> {
        let request = ConversationPollRequest {
            person_url: params.person_url.clone(),
            kind,
            since: params.since,
        };

        let conversation = poll_single(context.runtime, &request).await?;
        if conversation.errors.is_empty() {
            return render_response(tool_name, conversation, None);
        }

        info!(tool = tool_name, person_url = %request.person_url, "conversation not synced yet; syncing");
        let sync_name = match kind {
            ConversationKind::St => OperationName::SyncConversation,
            ConversationKind::Nv => OperationName::NvSyncConversation,
        };
        let sync = self
            .registry
            .get(sync_name)
            .ok_or_else(|| DispatchError::UnknownOperation(sync_name.to_string()))?;
        let outcome = execute_with_progress(
            context.runtime,
            sync,
            WorkflowMode::Start(json!({ "personUrl": params.person_url })),
            context.workflow_timeout,
            context.reporter,
        )
        .await?;
        if let WorkflowOutcome::Pending(pending) = outcome {
            return Ok(pretty(&serde_json::to_value(pending)?));
        }

        let conversation = poll_single(context.runtime, &request).await?;
        render_response(tool_name, conversation, None)
    }
}

async fn poll_single(runtime: &dyn WorkflowRuntime, request: &ConversationPollRequest) -> Result<MappedResponse<Value>, LinkedApiError> {
    let response = runtime.poll_conversations(std::slice::from_ref(request)).await?;
    Ok(MappedResponse {
        data: response.data.and_then(|conversations| conversations.into_iter().next()),
        errors: response.errors,
    })
}

fn typed_arguments<T: DeserializeOwned>(tool: &ToolSpec, arguments: Value) -> Result<T, InvalidArguments> {
    serde_json::from_value(arguments).map_err(|error| InvalidArguments {
        tool: tool.name.to_string(),
        violations: vec![error.to_string()],
    })
}

fn validate_usage_period(tool: &ToolSpec, params: &GetApiUsageParams) -> Result<(), InvalidArguments> {
    let invalid = |violation: String| InvalidArguments {
        tool: tool.name.to_string(),
        violations: vec![violation],
    };
    let start = DateTime::parse_from_rfc3339(&params.start).map_err(|error| invalid(format!("/start: {error}")))?;
    let end = DateTime::parse_from_rfc3339(&params.end).map_err(|error| invalid(format!("/end: {error}")))?;

    let period = end.signed_duration_since(start);
    if period < TimeDelta::zero() {
        return Err(invalid("end must not be before start".into()));
    }
    if period > TimeDelta::days(MAX_USAGE_PERIOD_DAYS) {
        return Err(invalid(format!("the period must not exceed {MAX_USAGE_PERIOD_DAYS} days")));
    }
    Ok(())
}

fn render_outcome(tool_name: &str, outcome: WorkflowOutcome, completion_text: Option<&'static str>) -> Result<String, DispatchError> {
    match outcome {
        WorkflowOutcome::Completed(response) => render_response(tool_name, response, completion_text),
        WorkflowOutcome::Pending(pending) => Ok(pretty(&serde_json::to_value(pending)?)),
    }
}

fn render_response(tool_name: &str, response: MappedResponse<Value>, completion_text: Option<&'static str>) -> Result<String, DispatchError> {
    let MappedResponse { data, errors } = response;
    match data {
        Some(data) => {
            if !errors.is_empty() {
                warn!(tool = tool_name, errors = ?errors, "returning partial data");
            }
            Ok(pretty(&data))
        }
        None if errors.is_empty() => Ok(completion_text.unwrap_or(COMPLETED_TEXT).to_string()),
        None => Ok(errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_error(tool_name: &str, error: DispatchError) -> String {
    match error {
        DispatchError::Remote(remote) => format!("Error executing {tool_name}: {remote}"),
        DispatchError::Encode(encode) => format!("Error executing {tool_name}: {encode}"),
        protocol => protocol.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
