mod core;
mod dispatch;
mod errors;
mod executor;
mod http;
mod progress;
mod prompts;
mod request;
mod stdio;
pub mod tools;

#[cfg(test)]
mod testing;

pub use self::core::{LinkedApiMcpCore, McpServices, ServicesError};
pub use dispatch::{InvocationContext, ToolDispatcher};
pub use errors::linked_api_error_body;
pub use executor::{PendingWorkflow, RESUME_TOOL_NAME, WorkflowMode, WorkflowOutcome, execute_with_progress};
pub use http::{MCP_PATH, McpHttpServer, RunningMcpHttpServer, resolve_bind_address};
pub use progress::{NoopProgressReporter, PROGRESS_TOTAL, PeerProgressReporter, ProgressReporter, WorkflowProgress};
pub use prompts::{AUTHENTICATION_PROMPT, server_instructions};
pub use request::RequestIdentity;
pub use stdio::serve_stdio;
