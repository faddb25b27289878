use std::time::Duration;

use async_trait::async_trait;
use linkedapi_types::MappedResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LinkedApiError;

/// Outcome of waiting on a remote workflow for a bounded time.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowPoll {
    /// The workflow finished; carries the raw completion document.
    Completed(Value),
    /// The wait budget elapsed while the workflow is still running remotely.
    Pending,
}

/// Which inbox a conversation lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationKind {
    /// Standard LinkedIn messaging.
    St,
    /// Sales Navigator messaging.
    Nv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPollRequest {
    pub person_url: String,
    #[serde(rename = "type")]
    pub kind: ConversationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// The remote workflow runtime.
///
/// Implementations are stateless with respect to individual workflows: the
/// remote system is the only owner of in-flight state, keyed by workflow id.
#[async_trait]
pub trait WorkflowRuntime: Send + Sync {
    /// Start a workflow and return its opaque identifier.
    async fn start_workflow(&self, definition: &Value) -> Result<String, LinkedApiError>;

    /// Wait up to `timeout` for the workflow to finish.
    async fn wait_for_completion(&self, workflow_id: &str, timeout: Duration) -> Result<WorkflowPoll, LinkedApiError>;

    /// Action usage statistics between two ISO 8601 instants.
    async fn api_usage(&self, start: &str, end: &str) -> Result<MappedResponse<Value>, LinkedApiError>;

    /// Read one or more conversations without starting a workflow.
    async fn poll_conversations(
        &self,
        requests: &[ConversationPollRequest],
    ) -> Result<MappedResponse<Vec<Value>>, LinkedApiError>;
}
