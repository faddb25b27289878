//! Remote operations: how each one builds its workflow definition and how
//! its completion document maps back to a [`MappedResponse`].

use std::time::Duration;

use linkedapi_types::{ActionError, MappedResponse, OperationName};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::LinkedApiError;
use crate::runtime::{WorkflowPoll, WorkflowRuntime};

/// An optional follow-up action requested by a boolean flag on an "open page" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildAction {
    /// Boolean parameter that enables the child, e.g. `retrievePosts`.
    pub flag: &'static str,
    pub action_type: &'static str,
    /// Parameter holding the child's own settings, e.g. `postsRetrievalConfig`.
    pub config_key: Option<&'static str>,
    /// Key the child's data is merged under in the final result.
    pub data_key: &'static str,
}

impl ChildAction {
    pub const fn new(flag: &'static str, action_type: &'static str, data_key: &'static str) -> Self {
        Self {
            flag,
            action_type,
            config_key: None,
            data_key,
        }
    }

    pub const fn configured(flag: &'static str, action_type: &'static str, config_key: &'static str, data_key: &'static str) -> Self {
        Self {
            flag,
            action_type,
            config_key: Some(config_key),
            data_key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowTemplate {
    /// A single action; parameters are spread into the action object.
    Action(&'static str),
    /// Open a page for its basic info, then run any flagged child actions.
    OpenPage {
        action_type: &'static str,
        children: &'static [ChildAction],
    },
    /// The caller supplies the whole definition under `definition`.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// The action's `data` is the result.
    Data,
    /// The action produces no payload; success is the absence of errors.
    Unit,
    /// The whole completion document is the result.
    Completion,
}

/// A named remote capability. Stateless and shared across concurrent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: OperationName,
    pub template: WorkflowTemplate,
    pub shape: ResultShape,
}

impl Operation {
    pub const fn new(name: OperationName, template: WorkflowTemplate, shape: ResultShape) -> Self {
        Self { name, template, shape }
    }

    /// Start the remote workflow and return its id. Never retried internally.
    pub async fn execute(&self, runtime: &dyn WorkflowRuntime, params: &Value) -> Result<String, LinkedApiError> {
        let definition = self.build_definition(params)?;
        runtime.start_workflow(&definition).await
    }

    /// Wait for an already started workflow and decode its outcome.
    ///
    /// A wait that runs out of budget yields [`LinkedApiError::WorkflowTimeout`]
    /// carrying this operation's name, so the caller can resume later.
    pub async fn result(
        &self,
        runtime: &dyn WorkflowRuntime,
        workflow_id: &str,
        timeout: Duration,
    ) -> Result<MappedResponse<Value>, LinkedApiError> {
        match runtime.wait_for_completion(workflow_id, timeout).await? {
            WorkflowPoll::Completed(completion) => self.map_completion(completion),
            WorkflowPoll::Pending => Err(LinkedApiError::WorkflowTimeout {
                workflow_id: workflow_id.to_string(),
                operation_name: self.name,
            }),
        }
    }

    pub fn build_definition(&self, params: &Value) -> Result<Value, LinkedApiError> {
        match self.template {
            WorkflowTemplate::Custom => params
                .get("definition")
                .filter(|definition| !definition.is_null())
                .cloned()
                .ok_or_else(|| LinkedApiError::InvalidParams("custom workflows require a `definition`".into())),
            WorkflowTemplate::Action(action_type) => {
                let mut action = params_object(params)?;
                action.insert("actionType".into(), Value::from(action_type));
                Ok(Value::Object(action))
            }
            WorkflowTemplate::OpenPage { action_type, children } => {
                let mut action = params_object(params)?;
                let mut then = Vec::new();
                for child in children {
                    let requested = action.remove(child.flag).and_then(|flag| flag.as_bool()).unwrap_or(false);
                    let config = child.config_key.and_then(|key| action.remove(key));
                    if !requested {
                        continue;
                    }
                    let mut child_action = match config {
                        Some(Value::Object(config)) => config,
                        _ => Map::new(),
                    };
                    child_action.insert("actionType".into(), Value::from(child.action_type));
                    then.push(Value::Object(child_action));
                }

                action.insert("actionType".into(), Value::from(action_type));
                action.insert("basicInfo".into(), Value::Bool(true));
                if !then.is_empty() {
                    action.insert("then".into(), Value::Array(then));
                }
                Ok(Value::Object(action))
            }
        }
    }

    pub fn map_completion(&self, completion: Value) -> Result<MappedResponse<Value>, LinkedApiError> {
        if self.shape == ResultShape::Completion {
            return Ok(MappedResponse::success(completion));
        }

        let action: ActionCompletion = serde_json::from_value(completion)?;
        if let Some(error) = action.failure() {
            return Ok(MappedResponse::failure(vec![error]));
        }
        if self.shape == ResultShape::Unit {
            return Ok(MappedResponse::empty());
        }

        let mut data = action.data.filter(|data| !data.is_null());
        let mut errors = Vec::new();
        if let WorkflowTemplate::OpenPage { children, .. } = self.template {
            for child_completion in action.then {
                let Some(child) = children
                    .iter()
                    .find(|child| child_completion.action_type.as_deref() == Some(child.action_type))
                else {
                    continue;
                };
                if let Some(error) = child_completion.failure() {
                    errors.push(error);
                    continue;
                }
                if let Value::Object(map) = data.get_or_insert_with(|| Value::Object(Map::new())) {
                    map.insert(child.data_key.into(), child_completion.data.unwrap_or(Value::Null));
                }
            }
        }

        Ok(MappedResponse { data, errors })
    }
}

fn params_object(params: &Value) -> Result<Map<String, Value>, LinkedApiError> {
    match params {
        Value::Object(map) => Ok(map.clone()),
        Value::Null => Ok(Map::new()),
        other => Err(LinkedApiError::InvalidParams(format!("expected an object, got {other}"))),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionCompletion {
    #[serde(default)]
    action_type: Option<String>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ActionError>,
    #[serde(default)]
    then: Vec<ActionCompletion>,
}

impl ActionCompletion {
    fn failure(&self) -> Option<ActionError> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if self.success == Some(false) {
            let action = self.action_type.as_deref().unwrap_or("action");
            return Some(ActionError::new("actionFailed", format!("{action} did not succeed")));
        }
        None
    }
}
