//! HTTP client for the Linked API workflow service.
//!
//! [`LinkedApiClient`] is cheap to construct: it borrows a shared
//! `reqwest::Client` and carries only the caller's credentials, so one
//! instance is built per MCP request. Base URLs are validated the same way
//! for every deployment:
//!
//! - `localhost` or `127.0.0.1`: any scheme is allowed
//! - otherwise: HTTPS on `linkedapi.io` or one of its subdomains

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use linkedapi_types::MappedResponse;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::LinkedApiError;
use crate::runtime::{ConversationPollRequest, WorkflowPoll, WorkflowRuntime};

pub const DEFAULT_API_BASE_URL: &str = "https://api.linkedapi.io";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

const LINKED_API_TOKEN_HEADER: &str = "linked-api-token";
const IDENTIFICATION_TOKEN_HEADER: &str = "identification-token";
const CLIENT_HEADER: &str = "client";

/// Allowed base domains for non-local API hosts. Subdomains are allowed.
const ALLOWED_LINKED_API_DOMAINS: &[&str] = &["linkedapi.io"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Per-caller tokens, passed through verbatim to Linked API.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LinkedApiCredentials {
    pub linked_api_token: Option<String>,
    pub identification_token: Option<String>,
}

impl LinkedApiCredentials {
    pub fn new(linked_api_token: Option<String>, identification_token: Option<String>) -> Self {
        Self {
            linked_api_token,
            identification_token,
        }
    }
}

impl fmt::Debug for LinkedApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("LinkedApiCredentials")
            .field("linked_api_token", &redact(&self.linked_api_token))
            .field("identification_token", &redact(&self.identification_token))
            .finish()
    }
}

/// Build the process-wide HTTP client shared by every [`LinkedApiClient`].
pub fn build_http_client() -> Result<Client, LinkedApiError> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    default_headers.insert(HeaderName::from_static(CLIENT_HEADER), HeaderValue::from_static("mcp"));

    Client::builder()
        .default_headers(default_headers)
        .user_agent(format!("linkedapi-mcp/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(LinkedApiError::Transport)
}

#[derive(Debug, Clone)]
pub struct LinkedApiClient {
    base_url: Url,
    http: Client,
    credentials: LinkedApiCredentials,
    poll_interval: Duration,
}

impl LinkedApiClient {
    pub fn new(base_url: &str, credentials: LinkedApiCredentials, http: Client) -> Result<Self, LinkedApiError> {
        let base_url = validate_base_url(base_url)?;
        Ok(Self {
            base_url,
            http,
            credentials,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override how often workflow status is polled while waiting.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, LinkedApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LinkedApiError::InvalidConfig(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, LinkedApiError> {
        let url = self.endpoint(segments)?;
        debug!(%url, %method, "building Linked API request");

        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.credentials.linked_api_token {
            builder = builder.header(LINKED_API_TOKEN_HEADER, token_header(token)?);
        }
        if let Some(token) = &self.credentials.identification_token {
            builder = builder.header(IDENTIFICATION_TOKEN_HEADER, token_header(token)?);
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, LinkedApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => envelope,
            Err(error) if status.is_success() => return Err(LinkedApiError::Decode(error)),
            Err(_) => {
                return Err(LinkedApiError::Http {
                    status: status.as_u16(),
                    body,
                });
            }
        };

        if let Some(error) = envelope.error {
            return Err(LinkedApiError::Api {
                error_type: error.error_type,
                message: error.message,
            });
        }
        if !envelope.success || !status.is_success() {
            return Err(LinkedApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_value(envelope.result.unwrap_or(Value::Null))?)
    }
}

fn token_header(token: &str) -> Result<HeaderValue, LinkedApiError> {
    let mut value = HeaderValue::from_str(token)
        .map_err(|_| LinkedApiError::InvalidConfig("token contains characters that are not valid in a header".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartedWorkflow {
    workflow_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WorkflowStatus {
    Pending,
    Running,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowState {
    workflow_status: WorkflowStatus,
    #[serde(default)]
    completion: Option<Value>,
    #[serde(default)]
    failure: Option<WorkflowFailure>,
}

#[derive(Debug, Deserialize)]
struct WorkflowFailure {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl WorkflowRuntime for LinkedApiClient {
    async fn start_workflow(&self, definition: &Value) -> Result<String, LinkedApiError> {
        let request = self.request(Method::POST, &["workflows"])?.json(definition);
        let started: StartedWorkflow = self.send(request).await?;
        debug!(workflow_id = %started.workflow_id, "workflow started");
        Ok(started.workflow_id)
    }

    async fn wait_for_completion(&self, workflow_id: &str, timeout: Duration) -> Result<WorkflowPoll, LinkedApiError> {
        let deadline = Instant::now() + timeout;
        loop {
            let request = self.request(Method::GET, &["workflows", workflow_id])?;
            let state: WorkflowState = match tokio::time::timeout_at(deadline, self.send(request)).await {
                Ok(state) => state?,
                Err(_) => {
                    debug!(%workflow_id, "wait budget exhausted during status request");
                    return Ok(WorkflowPoll::Pending);
                }
            };
            match state.workflow_status {
                WorkflowStatus::Completed => return Ok(WorkflowPoll::Completed(state.completion.unwrap_or(Value::Null))),
                WorkflowStatus::Failed => {
                    let message = state
                        .failure
                        .and_then(|failure| failure.message.or(failure.reason))
                        .unwrap_or_else(|| "workflow failed".to_string());
                    return Err(LinkedApiError::WorkflowFailed {
                        workflow_id: workflow_id.to_string(),
                        message,
                    });
                }
                WorkflowStatus::Pending | WorkflowStatus::Running | WorkflowStatus::Unknown => {}
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if !remaining.is_zero() {
                tokio::time::sleep(self.poll_interval.min(remaining)).await;
            }
            if Instant::now() >= deadline {
                debug!(%workflow_id, "wait budget exhausted; workflow still running");
                return Ok(WorkflowPoll::Pending);
            }
        }
    }

    async fn api_usage(&self, start: &str, end: &str) -> Result<MappedResponse<Value>, LinkedApiError> {
        let request = self
            .request(Method::GET, &["stats", "actions"])?
            .query(&[("start", start), ("end", end)]);
        into_mapped(self.send(request).await)
    }

    async fn poll_conversations(
        &self,
        requests: &[ConversationPollRequest],
    ) -> Result<MappedResponse<Vec<Value>>, LinkedApiError> {
        let request = self.request(Method::POST, &["conversations", "poll"])?.json(requests);
        into_mapped(self.send(request).await)
    }
}

/// Direct reads report remote rejections in-band, except credential problems.
fn into_mapped<T>(result: Result<T, LinkedApiError>) -> Result<MappedResponse<T>, LinkedApiError> {
    match result {
        Ok(data) => Ok(MappedResponse::success(data)),
        Err(error) if error.is_authentication() => Err(error),
        Err(LinkedApiError::Api { error_type, message }) => {
            Ok(MappedResponse::failure(vec![linkedapi_types::ActionError::new(error_type, message)]))
        }
        Err(error) => Err(error),
    }
}

/// Validate that a base URL is acceptable for use by the client.
pub fn validate_base_url(base: &str) -> Result<Url, LinkedApiError> {
    let parsed_base_url =
        Url::parse(base).map_err(|error| LinkedApiError::InvalidConfig(format!("invalid base URL '{base}': {error}")))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| LinkedApiError::InvalidConfig(format!("base URL '{base}' must include a host")))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(parsed_base_url);
    }

    if parsed_base_url.scheme() != "https" {
        return Err(LinkedApiError::InvalidConfig(format!(
            "base URL must use https for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        )));
    }

    let is_allowed_domain = ALLOWED_LINKED_API_DOMAINS.iter().any(|&allowed_domain| {
        host_name.eq_ignore_ascii_case(allowed_domain) || host_name.ends_with(&format!(".{allowed_domain}"))
    });
    if !is_allowed_domain {
        return Err(LinkedApiError::InvalidConfig(format!(
            "base URL host '{host_name}' is not allowed; must be one of {ALLOWED_LINKED_API_DOMAINS:?} or a subdomain, or localhost"
        )));
    }

    Ok(parsed_base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_default_and_local_base_urls() {
        assert!(validate_base_url(DEFAULT_API_BASE_URL).is_ok());
        assert!(validate_base_url("http://localhost:8080").is_ok());
        assert!(validate_base_url("http://127.0.0.1:3001/api").is_ok());
    }

    #[test]
    fn rejects_plain_http_and_foreign_hosts() {
        let error = validate_base_url("http://api.linkedapi.io").unwrap_err();
        assert!(error.to_string().contains("https"));

        let error = validate_base_url("https://linkedapi.io.evil.example").unwrap_err();
        assert!(error.to_string().contains("not allowed"));

        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn endpoint_appends_escaped_segments() {
        let client = LinkedApiClient::new("http://localhost:9000/v1/", LinkedApiCredentials::default(), Client::new()).unwrap();
        let url = client.endpoint(&["workflows", "wf 1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v1/workflows/wf%201");
    }

    #[test]
    fn credentials_debug_output_is_redacted() {
        let credentials = LinkedApiCredentials::new(Some("secret-token".into()), None);
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn auth_rejections_are_not_folded_into_mapped_errors() {
        let auth = into_mapped::<Value>(Err(LinkedApiError::api("invalidLinkedApiToken", "bad")));
        assert!(matches!(auth, Err(LinkedApiError::Api { .. })));

        let rejected = into_mapped::<Value>(Err(LinkedApiError::api("invalidDateRange", "range too wide"))).unwrap();
        assert_eq!(rejected.errors[0].error_type, "invalidDateRange");
        assert!(rejected.data.is_none());
    }
}
