//! Linked API client library.
//!
//! This crate owns everything that talks to the remote workflow runtime:
//!
//! - [`WorkflowRuntime`]: the seam between the MCP server and Linked API
//! - [`LinkedApiClient`]: the `reqwest` implementation of that seam
//! - [`Operation`]: how one named action becomes a workflow and back
//! - [`OperationRegistry`]: the fixed catalog of operations
//!
//! # Example
//!
//! ```ignore
//! use linkedapi_api::{LinkedApiClient, LinkedApiCredentials, OperationRegistry, build_http_client};
//!
//! let client = LinkedApiClient::new(
//!     linkedapi_api::DEFAULT_API_BASE_URL,
//!     LinkedApiCredentials::new(Some(token), Some(identification)),
//!     build_http_client()?,
//! )?;
//! let registry = OperationRegistry::standard();
//! let search = registry.find("searchPeople")?;
//! let workflow_id = search.execute(&client, &serde_json::json!({"term": "rust"})).await?;
//! let outcome = search.result(&client, &workflow_id, std::time::Duration::from_secs(60)).await?;
//! ```

mod client;
mod error;
mod operation;
mod registry;
mod runtime;

pub use client::{
    DEFAULT_API_BASE_URL, DEFAULT_POLL_INTERVAL, LinkedApiClient, LinkedApiCredentials, build_http_client, validate_base_url,
};
pub use error::{AUTHENTICATION_ERROR_TYPES, LinkedApiError};
pub use operation::{ChildAction, Operation, ResultShape, WorkflowTemplate};
pub use registry::{OperationRegistry, RegistryError};
pub use runtime::{ConversationKind, ConversationPollRequest, WorkflowPoll, WorkflowRuntime};
