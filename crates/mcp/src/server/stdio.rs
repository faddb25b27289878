use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use tracing::info;

use crate::server::core::{LinkedApiMcpCore, McpServices};

/// Serve one MCP session over stdin/stdout until the client disconnects.
///
/// Credentials and client identity come from configuration only on this
/// transport.
pub async fn serve_stdio(services: Arc<McpServices>) -> Result<()> {
    info!("serving MCP over stdio");
    let running = LinkedApiMcpCore::new(services).serve(rmcp::transport::stdio()).await?;
    let reason = running.waiting().await?;
    info!(?reason, "stdio session ended");
    Ok(())
}
