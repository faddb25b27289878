//! In-memory workflow runtime for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use linkedapi_api::{ConversationPollRequest, LinkedApiError, WorkflowPoll, WorkflowRuntime};
use linkedapi_types::MappedResponse;
use serde_json::{Value, json};

/// Scripted behaviour for one `wait_for_completion` call.
#[derive(Debug, Clone)]
pub enum FakeWait {
    Complete { after: Duration, completion: Value },
    /// Sleeps for the whole budget, then reports the workflow as still running.
    Pending,
    Fail { after: Duration, message: String },
    Panic,
}

#[derive(Debug)]
pub struct FakeRuntime {
    workflow_id: String,
    start_error: Option<(String, String)>,
    pub start_calls: AtomicUsize,
    started: Mutex<Vec<Value>>,
    waits: Mutex<VecDeque<FakeWait>>,
    waited: Mutex<Vec<String>>,
    polls: Mutex<VecDeque<MappedResponse<Vec<Value>>>>,
    poll_requests: Mutex<Vec<Vec<ConversationPollRequest>>>,
    usage_requests: Mutex<Vec<(String, String)>>,
}

impl FakeRuntime {
    pub fn new(workflow_id: &str) -> Self {
        Self {
            workflow_id: workflow_id.to_string(),
            start_error: None,
            start_calls: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
            waits: Mutex::new(VecDeque::new()),
            waited: Mutex::new(Vec::new()),
            polls: Mutex::new(VecDeque::new()),
            poll_requests: Mutex::new(Vec::new()),
            usage_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_start(mut self, error_type: &str, message: &str) -> Self {
        self.start_error = Some((error_type.to_string(), message.to_string()));
        self
    }

    pub fn push_wait(&self, wait: FakeWait) {
        self.waits.lock().unwrap().push_back(wait);
    }

    pub fn push_poll(&self, response: MappedResponse<Vec<Value>>) {
        self.polls.lock().unwrap().push_back(response);
    }

    pub fn started_definitions(&self) -> Vec<Value> {
        self.started.lock().unwrap().clone()
    }

    pub fn waited_ids(&self) -> Vec<String> {
        self.waited.lock().unwrap().clone()
    }

    pub fn poll_requests(&self) -> Vec<Vec<ConversationPollRequest>> {
        self.poll_requests.lock().unwrap().clone()
    }

    pub fn usage_requests(&self) -> Vec<(String, String)> {
        self.usage_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkflowRuntime for FakeRuntime {
    async fn start_workflow(&self, definition: &Value) -> Result<String, LinkedApiError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((error_type, message)) = &self.start_error {
            return Err(LinkedApiError::api(error_type.clone(), message.clone()));
        }
        self.started.lock().unwrap().push(definition.clone());
        Ok(self.workflow_id.clone())
    }

    async fn wait_for_completion(&self, workflow_id: &str, timeout: Duration) -> Result<WorkflowPoll, LinkedApiError> {
        self.waited.lock().unwrap().push(workflow_id.to_string());
        let wait = self.waits.lock().unwrap().pop_front().unwrap_or(FakeWait::Complete {
            after: Duration::ZERO,
            completion: json!({"success": true}),
        });
        match wait {
            FakeWait::Complete { after, completion } => {
                tokio::time::sleep(after).await;
                Ok(WorkflowPoll::Completed(completion))
            }
            FakeWait::Pending => {
                tokio::time::sleep(timeout).await;
                Ok(WorkflowPoll::Pending)
            }
            FakeWait::Fail { after, message } => {
                tokio::time::sleep(after).await;
                Err(LinkedApiError::WorkflowFailed {
                    workflow_id: workflow_id.to_string(),
                    message,
                })
            }
            FakeWait::Panic => panic!("runtime exploded"),
        }
    }

    async fn api_usage(&self, start: &str, end: &str) -> Result<MappedResponse<Value>, LinkedApiError> {
        self.usage_requests
            .lock()
            .unwrap()
            .push((start.to_string(), end.to_string()));
        Ok(MappedResponse::success(json!([{"actionType": "st.searchPeople", "count": 3}])))
    }

    async fn poll_conversations(
        &self,
        requests: &[ConversationPollRequest],
    ) -> Result<MappedResponse<Vec<Value>>, LinkedApiError> {
        self.poll_requests.lock().unwrap().push(requests.to_vec());
        Ok(self
            .polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MappedResponse::success(Vec::new())))
    }
}
