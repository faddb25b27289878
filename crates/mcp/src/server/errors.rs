//! Error payload helpers.

use chrono::Utc;
use linkedapi_api::LinkedApiError;
use rmcp::model::ErrorData;
use serde_json::{Value, json};

use crate::server::prompts::AUTHENTICATION_PROMPT;

fn build_error_data(error_code: &str, category: &str, message: &str, context: Value, retryable: bool, suggested_action: &str) -> Value {
    json!({
        "error_code": error_code,
        "category": category,
        "message": message,
        "context": context,
        "retryable": retryable,
        "suggested_action": suggested_action,
        "correlation_id": format!("linkedapi-{}", Utc::now().timestamp_millis()),
    })
}

pub fn not_found_error(error_code: &str, message: impl Into<String>, context: Value, suggested_action: &str) -> ErrorData {
    let message = message.into();
    ErrorData::resource_not_found(
        message.clone(),
        Some(build_error_data(error_code, "not_found", &message, context, false, suggested_action)),
    )
}

/// JSON body returned in-band for a remote domain error.
///
/// Credential problems are answered with setup guidance instead of the raw
/// remote message.
pub fn linked_api_error_body(error: &LinkedApiError) -> Value {
    if error.is_authentication() {
        return json!({ "message": AUTHENTICATION_PROMPT });
    }
    match error {
        LinkedApiError::Api { error_type, message } => json!({ "message": message, "type": error_type }),
        LinkedApiError::WorkflowFailed { workflow_id, message } => {
            json!({ "message": message, "type": "workflowFailed", "workflowId": workflow_id })
        }
        other => json!({ "message": other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_errors_carry_setup_guidance_only() {
        let body = linked_api_error_body(&LinkedApiError::api("linkedApiTokenRequired", "token missing"));
        assert_eq!(body, json!({ "message": AUTHENTICATION_PROMPT }));
    }

    #[test]
    fn other_domain_errors_keep_type_and_message() {
        let body = linked_api_error_body(&LinkedApiError::api("personNotFound", "Person not found"));
        assert_eq!(body, json!({ "message": "Person not found", "type": "personNotFound" }));
    }

    #[test]
    fn not_found_error_includes_structured_context() {
        let error = not_found_error("PROMPT_NOT_FOUND", "missing", json!({"name": "x"}), "List prompts.");
        let data = error.data.unwrap();
        assert_eq!(data["category"], "not_found");
        assert_eq!(data["retryable"], false);
        assert_eq!(data["context"]["name"], "x");
    }
}
