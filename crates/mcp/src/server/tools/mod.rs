//! Static tool table: name to `{schema, description, handler}`, built once.

mod catalog;
pub mod schemas;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use linkedapi_api::ConversationKind;
use linkedapi_types::OperationName;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolSetError {
    #[error("schema for tool '{name}' is invalid: {message}")]
    InvalidSchema { name: &'static str, message: String },
    #[error("tool '{0}' is registered more than once")]
    DuplicateTool(&'static str),
}

/// Argument problems detected before anything is sent to Linked API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid arguments for {tool}: {}", violations.join("; "))]
pub struct InvalidArguments {
    pub tool: String,
    pub violations: Vec<String>,
}

/// What a tool does once its arguments are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolHandler {
    /// Start the operation through the progress-tracking executor.
    Workflow {
        operation: OperationName,
        /// Replaces the generic "Completed" text for payload-less results.
        completion_text: Option<&'static str>,
    },
    /// Re-attach to a running workflow by id and operation tag.
    ResumeWorkflow,
    /// Direct usage statistics read.
    ApiUsage,
    /// Direct conversation read, with a sync workflow as fallback.
    Conversation(ConversationKind),
}

impl ToolHandler {
    pub const fn workflow(operation: OperationName) -> Self {
        ToolHandler::Workflow {
            operation,
            completion_text: None,
        }
    }

    pub const fn confirmed(operation: OperationName, completion_text: &'static str) -> Self {
        ToolHandler::Workflow {
            operation,
            completion_text: Some(completion_text),
        }
    }
}

type Normalizer = fn(Value) -> Result<Value, serde_json::Error>;

pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: ToolHandler,
    pub read_only: bool,
    input_schema: Arc<JsonObject>,
    validator: jsonschema::Validator,
    normalize: Normalizer,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("handler", &self.handler)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

impl ToolSpec {
    /// Build a tool whose input contract is the JSON Schema of `T`.
    pub fn typed<T>(name: &'static str, description: &'static str, handler: ToolHandler) -> Result<Self, ToolSetError>
    where
        T: JsonSchema + DeserializeOwned + Serialize,
    {
        let schema = typed_tool_schema::<T>();
        let validator = jsonschema::Validator::new(&schema).map_err(|error| ToolSetError::InvalidSchema {
            name,
            message: error.to_string(),
        })?;
        let Value::Object(input_schema) = schema else {
            return Err(ToolSetError::InvalidSchema {
                name,
                message: "schema root is not an object".into(),
            });
        };

        Ok(Self {
            name,
            description,
            handler,
            read_only: false,
            input_schema: Arc::new(input_schema),
            validator,
            normalize: normalize_as::<T>,
        })
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Validate raw arguments and return them with defaults applied.
    pub fn prepare_arguments(&self, arguments: Option<JsonObject>) -> Result<Value, InvalidArguments> {
        let arguments = Value::Object(arguments.unwrap_or_default());
        if !self.validator.is_valid(&arguments) {
            let violations = self
                .validator
                .iter_errors(&arguments)
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        error.to_string()
                    } else {
                        format!("{path}: {error}")
                    }
                })
                .collect();
            return Err(self.invalid(violations));
        }
        (self.normalize)(arguments).map_err(|error| self.invalid(vec![error.to_string()]))
    }

    fn invalid(&self, violations: Vec<String>) -> InvalidArguments {
        InvalidArguments {
            tool: self.name.to_string(),
            violations,
        }
    }

    pub fn descriptor(&self) -> Tool {
        let mut tool = Tool::new(self.name, self.description, Arc::clone(&self.input_schema));
        tool.annotations = Some(ToolAnnotations {
            read_only_hint: Some(self.read_only),
            open_world_hint: Some(true),
            ..Default::default()
        });
        tool
    }
}

fn typed_tool_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| serde_json::json!({"type": "object"}));
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    schema
}

fn normalize_as<T: DeserializeOwned + Serialize>(arguments: Value) -> Result<Value, serde_json::Error> {
    let typed: T = serde_json::from_value(arguments)?;
    serde_json::to_value(typed)
}

/// The complete, ordered tool table.
#[derive(Debug)]
pub struct ToolSet {
    tools: IndexMap<&'static str, ToolSpec>,
}

impl ToolSet {
    pub fn new(specs: Vec<ToolSpec>) -> Result<Self, ToolSetError> {
        let mut tools = IndexMap::with_capacity(specs.len());
        for spec in specs {
            if tools.contains_key(spec.name) {
                return Err(ToolSetError::DuplicateTool(spec.name));
            }
            tools.insert(spec.name, spec);
        }
        Ok(Self { tools })
    }

    /// Every Linked API tool plus `get_workflow_result` and `get_api_usage`.
    pub fn standard() -> Result<Self, ToolSetError> {
        Self::new(catalog::standard_tools()?)
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    pub fn descriptors(&self) -> Vec<Tool> {
        self.tools.values().map(ToolSpec::descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
