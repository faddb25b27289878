//! Model Context Protocol server for Linked API.
//!
//! Every Linked API action is exposed as an MCP tool. Actions run as remote
//! workflows that can outlive a single tool call; when the local wait budget
//! runs out the caller gets the workflow id back and re-attaches through
//! `get_workflow_result` instead of starting the action again.

pub mod config;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::{LinkedApiMcpCore, McpHttpServer, McpServices, RunningMcpHttpServer, ToolDispatcher, serve_stdio};
