use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use linkedapi_api::{DEFAULT_API_BASE_URL, LinkedApiCredentials};
use linkedapi_mcp::server::resolve_bind_address;
use linkedapi_mcp::{McpHttpServer, McpServices, ServerConfig, serve_stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

/// Linked API MCP server.
#[derive(Debug, Parser)]
#[command(name = "linkedapi-mcp", version, about)]
struct Args {
    #[arg(long, env = "LINKED_API_MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Shorthand for `--transport http`.
    #[arg(long)]
    http: bool,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "LINKED_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Used for requests that carry no `linked-api-token` of their own.
    #[arg(long, env = "LINKED_API_TOKEN", hide_env_values = true)]
    linked_api_token: Option<String>,

    /// Used for requests that carry no `identification-token` of their own.
    #[arg(long, env = "IDENTIFICATION_TOKEN", hide_env_values = true)]
    identification_token: Option<String>,

    /// MCP client name used to size the wait budget (claude, chatgpt, cursor, ...).
    #[arg(long, env = "MCP_CLIENT")]
    client: Option<String>,

    #[arg(long, env = "LINKED_API_POLL_INTERVAL", default_value_t = 5)]
    poll_interval_secs: u64,
}

impl Args {
    fn transport(&self) -> Transport {
        if self.http { Transport::Http } else { self.transport }
    }

    fn server_config(&self) -> Result<ServerConfig> {
        let config = ServerConfig::new(self.api_base_url.clone())?
            .with_credentials(LinkedApiCredentials::new(
                self.linked_api_token.clone(),
                self.identification_token.clone(),
            ))
            .with_default_client(self.client.clone())
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs));
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = args.server_config().context("invalid server configuration")?;
    let services = Arc::new(McpServices::new(config)?);

    match args.transport() {
        Transport::Stdio => serve_stdio(services).await,
        Transport::Http => {
            let address = resolve_bind_address(&args.host, args.port)?;
            let running = McpHttpServer::new(address, services).start().await?;
            tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
            info!("shutdown requested");
            running.stop().await
        }
    }
}

/// Logs go to stderr; stdout belongs to the stdio transport.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_KEYS: &[&str] = &[
        "LINKED_API_MCP_TRANSPORT",
        "HOST",
        "PORT",
        "LINKED_API_BASE_URL",
        "LINKED_API_TOKEN",
        "IDENTIFICATION_TOKEN",
        "MCP_CLIENT",
        "LINKED_API_POLL_INTERVAL",
    ];

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        let unset: Vec<(&str, Option<&str>)> = ENV_KEYS.iter().map(|key| (*key, None)).collect();
        temp_env::with_vars(unset, f)
    }

    #[test]
    fn defaults_to_stdio_against_the_public_api() {
        without_env(|| {
            let args = Args::try_parse_from(["linkedapi-mcp"]).unwrap();
            assert_eq!(args.transport(), Transport::Stdio);
            assert_eq!(args.port, 3000);
            let config = args.server_config().unwrap();
            assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
            assert_eq!(config.poll_interval, Duration::from_secs(5));
            assert!(config.default_credentials.linked_api_token.is_none());
        });
    }

    #[test]
    fn http_flag_overrides_transport() {
        without_env(|| {
            let args = Args::try_parse_from(["linkedapi-mcp", "--http", "--port", "8080"]).unwrap();
            assert_eq!(args.transport(), Transport::Http);
            assert_eq!(args.port, 8080);
        });
    }

    #[test]
    fn environment_supplies_default_credentials() {
        without_env(|| {
            temp_env::with_vars(
                [
                    ("LINKED_API_TOKEN", Some("token")),
                    ("IDENTIFICATION_TOKEN", Some("id")),
                    ("MCP_CLIENT", Some("cursor")),
                ],
                || {
                    let config = Args::try_parse_from(["linkedapi-mcp"]).unwrap().server_config().unwrap();
                    assert_eq!(config.default_credentials.linked_api_token.as_deref(), Some("token"));
                    assert_eq!(config.default_credentials.identification_token.as_deref(), Some("id"));
                    assert_eq!(config.default_client.as_deref(), Some("cursor"));
                },
            );
        });
    }

    #[test]
    fn rejects_untrusted_base_url_and_zero_poll_interval() {
        without_env(|| {
            let foreign = Args::try_parse_from(["linkedapi-mcp", "--api-base-url", "https://evil.example.com"]).unwrap();
            assert!(foreign.server_config().is_err());

            let zero = Args::try_parse_from(["linkedapi-mcp", "--poll-interval-secs", "0"]).unwrap();
            assert!(zero.server_config().is_err());
        });
    }
}
