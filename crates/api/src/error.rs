use linkedapi_types::OperationName;
use thiserror::Error;

/// Remote error types that indicate missing or rejected credentials.
pub const AUTHENTICATION_ERROR_TYPES: &[&str] = &[
    "linkedApiTokenRequired",
    "invalidLinkedApiToken",
    "identificationTokenRequired",
    "invalidIdentificationToken",
];

/// Errors produced while talking to Linked API.
#[derive(Debug, Error)]
pub enum LinkedApiError {
    /// The remote system rejected the request (bad input, bad credentials, plan limits).
    #[error("{message}")]
    Api { error_type: String, message: String },

    /// The local wait budget ran out while the workflow keeps running remotely.
    #[error("Workflow {workflow_id} ({operation_name}) did not complete within the wait budget")]
    WorkflowTimeout {
        workflow_id: String,
        operation_name: OperationName,
    },

    /// The remote workflow finished in a failed state.
    #[error("Workflow {workflow_id} failed: {message}")]
    WorkflowFailed { workflow_id: String, message: String },

    #[error("Linked API responded with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Linked API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode Linked API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid Linked API configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid workflow parameters: {0}")]
    InvalidParams(String),
}

impl LinkedApiError {
    pub fn api(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        LinkedApiError::Api {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// True for remote rejections caused by missing or invalid tokens.
    pub fn is_authentication(&self) -> bool {
        matches!(self, LinkedApiError::Api { error_type, .. } if AUTHENTICATION_ERROR_TYPES.contains(&error_type.as_str()))
    }

    /// Domain errors are remote-side decisions the user can act on.
    pub fn is_domain(&self) -> bool {
        matches!(self, LinkedApiError::Api { .. } | LinkedApiError::WorkflowFailed { .. })
    }
}
