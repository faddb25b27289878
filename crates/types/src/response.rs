use serde::{Deserialize, Serialize};

/// One failed remote action, as reported by Linked API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    /// Machine-readable error kind, e.g. `personNotFound`.
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl ActionError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

/// The mapped result of one workflow run.
///
/// - `data` with no `errors`: full success
/// - no `data` with `errors`: recoverable failure
/// - both: partial success
/// - neither: success without a payload (for example a sent message)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<ActionError>,
}

impl<T> Default for MappedResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            errors: Vec::new(),
        }
    }
}

impl<T> MappedResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failure(errors: Vec<ActionError>) -> Self {
        Self { data: None, errors }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
