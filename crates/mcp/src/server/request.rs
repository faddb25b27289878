//! Per-request caller identity: credentials and MCP client name.

use std::time::Duration;

use axum::http::HeaderMap;
use axum::http::request::Parts;
use linkedapi_api::LinkedApiCredentials;

use crate::config::{ServerConfig, derive_client_from_user_agent, request_timeout};

const LINKED_API_TOKEN_KEY: &str = "linked-api-token";
const IDENTIFICATION_TOKEN_KEY: &str = "identification-token";
const CLIENT_KEY: &str = "client";

/// Who is calling, resolved once per tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    pub credentials: LinkedApiCredentials,
    pub mcp_client: String,
}

impl RequestIdentity {
    /// Resolve from HTTP request parts when present, falling back to configuration.
    ///
    /// Credentials: header, then query parameter, then configured default.
    /// Client: `client` header, then `client` query parameter, then the
    /// `User-Agent`, then the configured default.
    pub fn resolve(parts: Option<&Parts>, config: &ServerConfig) -> Self {
        let headers = parts.map(|parts| &parts.headers);
        let query: Vec<(String, String)> = parts
            .and_then(|parts| parts.uri.query())
            .map(|query| url::form_urlencoded::parse(query.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        let lookup = |key: &str| header_value(headers, key).or_else(|| query_value(&query, key));

        let credentials = LinkedApiCredentials::new(
            lookup(LINKED_API_TOKEN_KEY).or_else(|| config.default_credentials.linked_api_token.clone()),
            lookup(IDENTIFICATION_TOKEN_KEY).or_else(|| config.default_credentials.identification_token.clone()),
        );

        let mcp_client = lookup(CLIENT_KEY)
            .or_else(|| header_value(headers, axum::http::header::USER_AGENT.as_str()).map(|ua| derive_client_from_user_agent(&ua)))
            .or_else(|| config.default_client.clone())
            .unwrap_or_default();

        Self { credentials, mcp_client }
    }

    pub fn workflow_timeout(&self) -> Duration {
        request_timeout(&self.mcp_client)
    }
}

fn header_value(headers: Option<&HeaderMap>, key: &str) -> Option<String> {
    headers?
        .get(key)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn query_value(query: &[(String, String)], key: &str) -> Option<String> {
    query
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn config() -> ServerConfig {
        ServerConfig::default()
            .with_credentials(LinkedApiCredentials::new(Some("env-token".into()), Some("env-id".into())))
            .with_default_client(Some("claude".into()))
    }

    #[test]
    fn headers_take_precedence_over_query_and_config() {
        let parts = parts(
            "/mcp?linked-api-token=query-token&client=cursor",
            &[("linked-api-token", "header-token"), ("client", "windsurf")],
        );
        let identity = RequestIdentity::resolve(Some(&parts), &config());
        assert_eq!(identity.credentials.linked_api_token.as_deref(), Some("header-token"));
        assert_eq!(identity.credentials.identification_token.as_deref(), Some("env-id"));
        assert_eq!(identity.mcp_client, "windsurf");
        assert_eq!(identity.workflow_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn query_parameters_fill_in_missing_headers() {
        let parts = parts("/mcp?identification-token=query-id&client=chatgpt", &[]);
        let identity = RequestIdentity::resolve(Some(&parts), &config());
        assert_eq!(identity.credentials.identification_token.as_deref(), Some("query-id"));
        assert_eq!(identity.mcp_client, "chatgpt");
        assert_eq!(identity.workflow_timeout(), Duration::from_secs(50));
    }

    #[test]
    fn user_agent_is_used_when_no_client_is_named() {
        let parts = parts("/mcp", &[("user-agent", "Cursor/1.2 (darwin)")]);
        let identity = RequestIdentity::resolve(Some(&parts), &config());
        assert_eq!(identity.mcp_client, "cursor");
    }

    #[test]
    fn stdio_requests_fall_back_to_configuration() {
        let identity = RequestIdentity::resolve(None, &config());
        assert_eq!(identity.credentials.linked_api_token.as_deref(), Some("env-token"));
        assert_eq!(identity.mcp_client, "claude");
        assert_eq!(identity.workflow_timeout(), Duration::from_secs(180));

        let anonymous = RequestIdentity::resolve(None, &ServerConfig::default());
        assert_eq!(anonymous.mcp_client, "");
        assert_eq!(anonymous.workflow_timeout(), Duration::from_secs(60));
    }
}
