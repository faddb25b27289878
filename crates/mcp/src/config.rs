//! Server configuration and per-client policy.

use std::time::Duration;

use linkedapi_api::{DEFAULT_API_BASE_URL, DEFAULT_POLL_INTERVAL, LinkedApiCredentials, validate_base_url};
use thiserror::Error;

const LONG_RUNNING_CLIENT_TIMEOUT: Duration = Duration::from_secs(600);
const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid Linked API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Validated server configuration shared by every request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_base_url: String,
    /// Used when a request carries no credentials of its own.
    pub default_credentials: LinkedApiCredentials,
    /// Used when a request does not identify its MCP client.
    pub default_client: Option<String>,
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_credentials: LinkedApiCredentials::default(),
            default_client: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ServerConfig {
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_credentials(mut self, credentials: LinkedApiCredentials) -> Self {
        self.default_credentials = credentials;
        self
    }

    pub fn with_default_client(mut self, client: Option<String>) -> Self {
        self.default_client = client.filter(|client| !client.trim().is_empty());
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.api_base_url).map_err(|error| ConfigError::InvalidBaseUrl(error.to_string()))?;
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "poll_interval",
                value: "0".into(),
            });
        }
        Ok(())
    }
}

/// Wait budget for one tool call, sized to the calling client's own request timeout.
pub fn request_timeout(mcp_client: &str) -> Duration {
    match mcp_client {
        "claude" => Duration::from_secs(180),
        "chatgpt" => Duration::from_secs(50),
        "cursor" | "vscode" | "windsurf" => LONG_RUNNING_CLIENT_TIMEOUT,
        _ => DEFAULT_CLIENT_TIMEOUT,
    }
}

/// Best-effort client identification from a `User-Agent` header.
pub fn derive_client_from_user_agent(user_agent: &str) -> String {
    let normalized = user_agent.to_ascii_lowercase();
    let contains_any = |needles: &[&str]| needles.iter().any(|needle| normalized.contains(needle));

    if contains_any(&["cursor"]) {
        "cursor".into()
    } else if contains_any(&["windsurf"]) {
        "windsurf".into()
    } else if contains_any(&["vscode", "visual studio code"]) {
        "vscode".into()
    } else if contains_any(&["chatgpt", "openai"]) {
        "chatgpt".into()
    } else if contains_any(&["curl"]) {
        "curl".into()
    } else if contains_any(&["postman"]) {
        "postman".into()
    } else if contains_any(&["mozilla", "chrome", "safari", "firefox"]) {
        "browser".into()
    } else {
        user_agent.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_table_matches_known_clients() {
        assert_eq!(request_timeout("claude"), Duration::from_secs(180));
        assert_eq!(request_timeout("chatgpt"), Duration::from_secs(50));
        assert_eq!(request_timeout("cursor"), Duration::from_secs(600));
        assert_eq!(request_timeout("vscode"), Duration::from_secs(600));
        assert_eq!(request_timeout("windsurf"), Duration::from_secs(600));
        assert_eq!(request_timeout(""), Duration::from_secs(60));
        assert_eq!(request_timeout("curl"), Duration::from_secs(60));
    }

    #[test]
    fn user_agent_derivation_prefers_specific_editors_over_browsers() {
        assert_eq!(derive_client_from_user_agent("Mozilla/5.0 Cursor/0.42"), "cursor");
        assert_eq!(derive_client_from_user_agent("Visual Studio Code/1.90"), "vscode");
        assert_eq!(derive_client_from_user_agent("openai-mcp/1.0"), "chatgpt");
        assert_eq!(derive_client_from_user_agent("curl/8.4.0"), "curl");
        assert_eq!(derive_client_from_user_agent("Mozilla/5.0 (X11) Firefox/120"), "browser");
        assert_eq!(derive_client_from_user_agent("claude-desktop"), "claude-desktop");
    }

    #[test]
    fn builder_keeps_trusted_hosts_and_drops_blank_client_names() {
        let config = ServerConfig::new("http://localhost:8080")
            .unwrap()
            .with_default_client(Some("  ".into()))
            .with_poll_interval(Duration::from_secs(1));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert!(config.default_client.is_none());
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_foreign_base_url_and_zero_poll_interval() {
        assert!(matches!(ServerConfig::new("https://example.com"), Err(ConfigError::InvalidBaseUrl(_))));

        let zero = ServerConfig::default().with_poll_interval(Duration::ZERO);
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::InvalidValue { name: "poll_interval", .. })
        ));
    }
}
