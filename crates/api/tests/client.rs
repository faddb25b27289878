use std::time::Duration;

use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use linkedapi_api::{
    ConversationKind, ConversationPollRequest, LinkedApiClient, LinkedApiCredentials, LinkedApiError, OperationRegistry, WorkflowPoll,
    WorkflowRuntime, build_http_client,
};
use linkedapi_types::OperationName;
use serde_json::json;

fn client_for(server: &MockServer) -> LinkedApiClient {
    LinkedApiClient::new(
        &server.base_url(),
        LinkedApiCredentials::new(Some("la-token".into()), Some("id-token".into())),
        build_http_client().unwrap(),
    )
    .unwrap()
    .with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn start_workflow_sends_definition_and_credentials() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/workflows")
                .header("linked-api-token", "la-token")
                .header("identification-token", "id-token")
                .header("client", "mcp")
                .json_body(json!({"actionType": "st.searchPeople", "term": "rust"}));
            then.status(200).json_body(json!({
                "success": true,
                "result": {"workflowId": "wf-42", "workflowStatus": "running"}
            }));
        })
        .await;

    let client = client_for(&server);
    let workflow_id = client
        .start_workflow(&json!({"actionType": "st.searchPeople", "term": "rust"}))
        .await
        .unwrap();

    assert_eq!(workflow_id, "wf-42");
    mock.assert_async().await;
}

#[tokio::test]
async fn remote_rejection_surfaces_as_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/workflows");
            then.status(401).json_body(json!({
                "success": false,
                "error": {"type": "invalidLinkedApiToken", "message": "Invalid Linked API token"}
            }));
        })
        .await;

    let error = client_for(&server).start_workflow(&json!({})).await.unwrap_err();
    assert!(error.is_authentication());
    assert_eq!(error.to_string(), "Invalid Linked API token");
}

#[tokio::test]
async fn unparseable_error_response_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/workflows");
            then.status(502).body("bad gateway");
        })
        .await;

    let error = client_for(&server).start_workflow(&json!({})).await.unwrap_err();
    match error {
        LinkedApiError::Http { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn wait_for_completion_returns_the_completion_document() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-1");
            then.status(200).json_body(json!({
                "success": true,
                "result": {
                    "workflowId": "wf-1",
                    "workflowStatus": "completed",
                    "completion": {"actionType": "st.searchPeople", "success": true, "data": [{"name": "Jane"}]}
                }
            }));
        })
        .await;

    let poll = client_for(&server)
        .wait_for_completion("wf-1", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(
        poll,
        WorkflowPoll::Completed(json!({"actionType": "st.searchPeople", "success": true, "data": [{"name": "Jane"}]}))
    );
}

#[tokio::test]
async fn wait_for_completion_gives_up_when_the_budget_runs_out() {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-slow");
            then.status(200).json_body(json!({
                "success": true,
                "result": {"workflowId": "wf-slow", "workflowStatus": "running"}
            }));
        })
        .await;

    let poll = client_for(&server)
        .wait_for_completion("wf-slow", Duration::from_millis(100))
        .await
        .unwrap();

    assert_eq!(poll, WorkflowPoll::Pending);
    assert!(status.hits_async().await >= 2);
}

#[tokio::test]
async fn slow_status_request_does_not_overrun_the_budget() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-slow");
            then.status(200).delay(Duration::from_secs(4)).json_body(json!({
                "success": true,
                "result": {"workflowId": "wf-slow", "workflowStatus": "running"}
            }));
        })
        .await;

    let started = std::time::Instant::now();
    let poll = client_for(&server)
        .wait_for_completion("wf-slow", Duration::from_secs(1))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(poll, WorkflowPoll::Pending);
    assert!(elapsed <= Duration::from_millis(1500), "wait took {elapsed:?}");
}

#[tokio::test]
async fn no_status_request_is_sent_after_the_deadline() {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-once");
            then.status(200).json_body(json!({
                "success": true,
                "result": {"workflowId": "wf-once", "workflowStatus": "running"}
            }));
        })
        .await;

    let client = client_for(&server).with_poll_interval(Duration::from_secs(5));
    let poll = client
        .wait_for_completion("wf-once", Duration::from_millis(200))
        .await
        .unwrap();

    assert_eq!(poll, WorkflowPoll::Pending);
    assert_eq!(status.hits_async().await, 1);
}

#[tokio::test]
async fn failed_workflow_is_reported_with_its_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-bad");
            then.status(200).json_body(json!({
                "success": true,
                "result": {
                    "workflowId": "wf-bad",
                    "workflowStatus": "failed",
                    "failure": {"reason": "accountRestricted", "message": "The LinkedIn account is restricted"}
                }
            }));
        })
        .await;

    let error = client_for(&server)
        .wait_for_completion("wf-bad", Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        LinkedApiError::WorkflowFailed { ref workflow_id, ref message }
            if workflow_id == "wf-bad" && message == "The LinkedIn account is restricted"
    ));
}

#[tokio::test]
async fn operation_result_times_out_with_resumable_identifiers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/workflows/wf-7");
            then.status(200).json_body(json!({
                "success": true,
                "result": {"workflowId": "wf-7", "workflowStatus": "running"}
            }));
        })
        .await;

    let client = client_for(&server);
    let registry = OperationRegistry::standard();
    let operation = registry.find("searchCompanies").unwrap();
    let error = operation
        .result(&client, "wf-7", Duration::from_millis(50))
        .await
        .unwrap_err();

    match error {
        LinkedApiError::WorkflowTimeout {
            workflow_id,
            operation_name,
        } => {
            assert_eq!(workflow_id, "wf-7");
            assert_eq!(operation_name, OperationName::SearchCompanies);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn api_usage_passes_the_date_range_as_query_parameters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/stats/actions")
                .query_param("start", "2024-01-01T00:00:00Z")
                .query_param("end", "2024-01-15T00:00:00Z");
            then.status(200).json_body(json!({
                "success": true,
                "result": [{"actionType": "st.searchPeople", "success": true}]
            }));
        })
        .await;

    let usage = client_for(&server)
        .api_usage("2024-01-01T00:00:00Z", "2024-01-15T00:00:00Z")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(usage.is_success());
    assert_eq!(usage.data.unwrap()[0]["actionType"], "st.searchPeople");
}

#[tokio::test]
async fn poll_conversations_reports_remote_rejections_in_band() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/conversations/poll")
                .json_body(json!([{"personUrl": "https://www.linkedin.com/in/x", "type": "st"}]));
            then.status(200).json_body(json!({
                "success": false,
                "error": {"type": "conversationsNotSynced", "message": "Conversation is not synced yet"}
            }));
        })
        .await;

    let response = client_for(&server)
        .poll_conversations(&[ConversationPollRequest {
            person_url: "https://www.linkedin.com/in/x".into(),
            kind: ConversationKind::St,
            since: None,
        }])
        .await
        .unwrap();

    assert!(response.data.is_none());
    assert_eq!(response.errors[0].error_type, "conversationsNotSynced");
}
