//! Streamable HTTP hosting.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::server::core::{LinkedApiMcpCore, McpServices};

pub const MCP_PATH: &str = "/mcp";

/// Host configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct McpHttpServer {
    bind_address: SocketAddr,
    services: Arc<McpServices>,
}

impl McpHttpServer {
    pub fn new(bind_address: SocketAddr, services: Arc<McpServices>) -> Self {
        Self { bind_address, services }
    }

    /// Start serving and return a handle for inspection and shutdown.
    pub async fn start(self) -> Result<RunningMcpHttpServer> {
        let cancellation_token = CancellationToken::new();
        let services = Arc::clone(&self.services);
        let service: StreamableHttpService<LinkedApiMcpCore, LocalSessionManager> = StreamableHttpService::new(
            move || Ok(LinkedApiMcpCore::new(Arc::clone(&services))),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                stateful_mode: true,
                sse_keep_alive: None,
                cancellation_token: cancellation_token.child_token(),
                ..Default::default()
            },
        );

        let router = Router::new().nest_service(MCP_PATH, service);
        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .with_context(|| format!("failed to bind MCP HTTP server to {}", self.bind_address))?;
        let bound_address = listener.local_addr()?;
        info!(address = %bound_address, path = MCP_PATH, "MCP HTTP server listening");

        let server_handle = tokio::spawn({
            let shutdown = cancellation_token.child_token();
            async move {
                if let Err(error) = axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        shutdown.cancelled().await;
                    })
                    .await
                {
                    warn!(%error, "MCP HTTP server stopped with an error");
                }
            }
        });

        Ok(RunningMcpHttpServer {
            bind_address: bound_address,
            cancellation_token,
            server_handle,
        })
    }
}

#[derive(Debug)]
pub struct RunningMcpHttpServer {
    bind_address: SocketAddr,
    cancellation_token: CancellationToken,
    server_handle: JoinHandle<()>,
}

impl RunningMcpHttpServer {
    pub fn bound_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Stop accepting requests and wait for open connections to drain.
    pub async fn stop(self) -> Result<()> {
        self.cancellation_token.cancel();
        self.server_handle
            .await
            .map_err(|error| anyhow!("MCP HTTP server task failed: {error}"))?;
        info!("MCP HTTP server stopped");
        Ok(())
    }
}

/// Parse `host` and `port` into a bind address.
pub fn resolve_bind_address(host: &str, port: u16) -> Result<SocketAddr> {
    let address = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    address
        .parse()
        .map_err(|error| anyhow!("invalid MCP HTTP bind address '{address}': {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn bind_address_accepts_ipv4_and_ipv6_hosts() {
        assert_eq!(resolve_bind_address("0.0.0.0", 3000).unwrap(), "0.0.0.0:3000".parse().unwrap());
        assert_eq!(resolve_bind_address("::1", 8080).unwrap(), "[::1]:8080".parse().unwrap());
        assert!(resolve_bind_address("not a host", 1).is_err());
    }

    #[tokio::test]
    async fn server_starts_on_an_ephemeral_port_and_stops() {
        let services = Arc::new(McpServices::new(ServerConfig::default()).unwrap());
        let address = resolve_bind_address("127.0.0.1", 0).unwrap();
        let running = McpHttpServer::new(address, services).start().await.unwrap();
        let bound = running.bound_address();
        assert_ne!(bound.port(), 0);
        assert!(tokio::net::TcpStream::connect(bound).await.is_ok());
        running.stop().await.unwrap();
    }
}
